//! Application state for the TUI.
//!
//! The state is rebuilt from every status poll, with one exception: a control
//! the user is currently adjusting keeps its local value until the user
//! releases it. Without that guard a poll landing mid-edit would snap the
//! control back to the device's value and fight the user's input.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use lampctl_types::StatusSnapshot;

use super::messages::{Command, DeviceEvent};
use crate::format;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(2000);

/// Color presets the `c` key cycles through, as (name, r, g, b).
pub const COLOR_PRESETS: [(&str, u8, u8, u8); 6] = [
    ("Warm", 255, 140, 60),
    ("Soft yellow", 255, 200, 100),
    ("White", 255, 255, 255),
    ("Orange", 255, 100, 60),
    ("Purple", 170, 100, 255),
    ("Blue", 70, 170, 255),
];

/// Adjustable controls that can hold the edit lock.
///
/// While a control holds the lock, the reconciler leaves its local value
/// alone. The schedule checkbox is deliberately not listed: toggling it is
/// instantaneous, so the device value always wins there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Brightness,
    Timeout,
    ScheduleStart,
    ScheduleEnd,
}

impl Control {
    /// Controls in Tab order.
    const CYCLE: [Control; 4] = [
        Control::Brightness,
        Control::Timeout,
        Control::ScheduleStart,
        Control::ScheduleEnd,
    ];

    /// Next control in Tab order.
    pub fn next(self) -> Self {
        let idx = Self::CYCLE.iter().position(|&c| c == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }

    /// Previous control in Tab order.
    pub fn prev(self) -> Self {
        let idx = Self::CYCLE.iter().position(|&c| c == self).unwrap_or(0);
        Self::CYCLE[(idx + Self::CYCLE.len() - 1) % Self::CYCLE.len()]
    }

    /// Whether this control takes free-form text input.
    pub fn is_text(self) -> bool {
        matches!(self, Control::ScheduleStart | Control::ScheduleEnd)
    }
}

/// A transient notification. Only one is shown at a time; a newer toast
/// replaces the current one and restarts the clock.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
    shown_at: Instant,
}

impl Toast {
    fn new(message: String, is_error: bool) -> Self {
        Self {
            message,
            is_error,
            shown_at: Instant::now(),
        }
    }

    fn expired(&self) -> bool {
        self.shown_at.elapsed() >= TOAST_DURATION
    }
}

/// Main application state.
pub struct App {
    /// Set when the user requests quit.
    should_quit: bool,
    /// Latest snapshot from the device, if any poll has succeeded.
    pub snapshot: Option<StatusSnapshot>,
    /// Control currently holding the edit lock.
    pub focus: Option<Control>,
    /// Local brightness ceiling value (mirrors the device unless locked).
    pub brightness_setting: u8,
    /// Local inactivity shutoff value in seconds.
    pub timeout_setting: u32,
    /// Schedule start edit buffer, "HH:MM".
    pub schedule_start_input: String,
    /// Schedule end edit buffer, "HH:MM".
    pub schedule_end_input: String,
    /// Index into [`COLOR_PRESETS`] for the next `c` press.
    pub color_index: usize,
    /// Currently displayed toast, if any.
    pub toast: Option<Toast>,
    /// Whether the last status poll failed.
    pub connection_lost: bool,
    /// Whether to show the help overlay.
    pub show_help: bool,
    /// Highest poll sequence number applied so far.
    last_poll_seq: u64,
    /// Channel for sending commands to the background worker.
    pub command_tx: mpsc::Sender<Command>,
    /// Channel for receiving events from the background worker.
    pub event_rx: mpsc::Receiver<DeviceEvent>,
}

impl App {
    /// Create a new application state.
    pub fn new(command_tx: mpsc::Sender<Command>, event_rx: mpsc::Receiver<DeviceEvent>) -> Self {
        Self {
            should_quit: false,
            snapshot: None,
            focus: None,
            brightness_setting: 0,
            timeout_setting: 0,
            schedule_start_input: String::new(),
            schedule_end_input: String::new(),
            color_index: 0,
            toast: None,
            connection_lost: false,
            show_help: false,
            last_poll_seq: 0,
            command_tx,
            event_rx,
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Request quit.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Show a toast, replacing any currently visible one.
    pub fn show_toast(&mut self, message: impl Into<String>, is_error: bool) {
        self.toast = Some(Toast::new(message.into(), is_error));
    }

    /// Drop the toast once its display time has elapsed.
    pub fn clean_expired_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::expired) {
            self.toast = None;
        }
    }

    /// Handle an incoming device event and update state accordingly.
    pub fn handle_device_event(&mut self, event: DeviceEvent) {
        match event {
            DeviceEvent::Snapshot { seq, snapshot } => {
                // A slower request may resolve after a newer one; applying it
                // would roll the UI back in time. Sequence numbers start at 1,
                // so only results newer than the last applied one pass.
                if seq <= self.last_poll_seq {
                    return;
                }
                self.last_poll_seq = seq;
                self.connection_lost = false;
                self.apply_snapshot(snapshot);
            }
            DeviceEvent::PollFailed { seq, error } => {
                if seq <= self.last_poll_seq {
                    return;
                }
                self.last_poll_seq = seq;
                self.connection_lost = true;
                tracing::debug!(%error, "Status poll failed");
            }
            DeviceEvent::CommandOk { message } => {
                self.show_toast(message, false);
            }
            DeviceEvent::CommandFailed { context, detail } => {
                self.show_toast(format!("{}: {}", context, detail), true);
            }
        }
    }

    /// Fold a fresh snapshot into the local state, skipping any control the
    /// user currently holds.
    fn apply_snapshot(&mut self, snapshot: StatusSnapshot) {
        if self.focus != Some(Control::Brightness) {
            self.brightness_setting = snapshot.max_brightness;
        }
        if self.focus != Some(Control::Timeout) {
            self.timeout_setting = snapshot.timeout;
        }
        if self.focus != Some(Control::ScheduleStart) {
            let (h, m) = snapshot.schedule_start();
            self.schedule_start_input = format::schedule_time(h, m);
        }
        if self.focus != Some(Control::ScheduleEnd) {
            let (h, m) = snapshot.schedule_end();
            self.schedule_end_input = format::schedule_time(h, m);
        }
        self.snapshot = Some(snapshot);
    }

    /// Move the edit lock to the next control.
    pub fn focus_next(&mut self) {
        self.focus = Some(match self.focus {
            Some(c) => c.next(),
            None => Control::Brightness,
        });
    }

    /// Move the edit lock to the previous control.
    pub fn focus_prev(&mut self) {
        self.focus = Some(match self.focus {
            Some(c) => c.prev(),
            None => Control::ScheduleEnd,
        });
    }

    /// Release the edit lock and let the next poll overwrite local values.
    pub fn release_focus(&mut self) {
        self.focus = None;
        // Discard any half-typed schedule edit immediately.
        if let Some(snapshot) = &self.snapshot {
            let (h, m) = snapshot.schedule_start();
            self.schedule_start_input = format::schedule_time(h, m);
            let (h, m) = snapshot.schedule_end();
            self.schedule_end_input = format::schedule_time(h, m);
        }
    }

    /// Edit buffer of the focused text control, if any.
    pub fn focused_text_buffer(&mut self) -> Option<&mut String> {
        match self.focus {
            Some(Control::ScheduleStart) => Some(&mut self.schedule_start_input),
            Some(Control::ScheduleEnd) => Some(&mut self.schedule_end_input),
            _ => None,
        }
    }

    /// Advance the color preset cycle and return the preset to apply.
    pub fn next_color_preset(&mut self) -> (&'static str, u8, u8, u8) {
        let preset = COLOR_PRESETS[self.color_index % COLOR_PRESETS.len()];
        self.color_index = (self.color_index + 1) % COLOR_PRESETS.len();
        preset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_app() -> App {
        let (tx, _rx) = mpsc::channel(8);
        let (_etx, erx) = mpsc::channel(8);
        App::new(tx, erx)
    }

    fn make_snapshot() -> StatusSnapshot {
        serde_json::from_str(
            r#"{
                "lightsOn": true,
                "brightness": 128,
                "maxBrightness": 200,
                "timeout": 30,
                "pir1": false,
                "pir2": false,
                "status": "Idle",
                "scheduleEnabled": true,
                "scheduleStartHour": 19,
                "scheduleStartMinute": 30,
                "scheduleEndHour": 6,
                "scheduleEndMinute": 0,
                "withinSchedule": true,
                "isArmed": false,
                "armedRemaining": 0,
                "currentTime": "21:15"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_snapshot_populates_controls() {
        let mut app = make_app();
        app.handle_device_event(DeviceEvent::Snapshot {
            seq: 1,
            snapshot: make_snapshot(),
        });

        assert_eq!(app.brightness_setting, 200);
        assert_eq!(app.timeout_setting, 30);
        assert_eq!(app.schedule_start_input, "19:30");
        assert_eq!(app.schedule_end_input, "06:00");
        assert!(!app.connection_lost);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut app = make_app();
        app.handle_device_event(DeviceEvent::Snapshot {
            seq: 1,
            snapshot: make_snapshot(),
        });
        let brightness = app.brightness_setting;
        let start = app.schedule_start_input.clone();

        app.handle_device_event(DeviceEvent::Snapshot {
            seq: 2,
            snapshot: make_snapshot(),
        });
        assert_eq!(app.brightness_setting, brightness);
        assert_eq!(app.schedule_start_input, start);
    }

    #[test]
    fn test_focused_control_survives_snapshot() {
        let mut app = make_app();
        app.handle_device_event(DeviceEvent::Snapshot {
            seq: 1,
            snapshot: make_snapshot(),
        });

        app.focus = Some(Control::Brightness);
        app.brightness_setting = 64;
        app.handle_device_event(DeviceEvent::Snapshot {
            seq: 2,
            snapshot: make_snapshot(),
        });

        // The locked control keeps the in-progress value, everything else
        // follows the device.
        assert_eq!(app.brightness_setting, 64);
        assert_eq!(app.timeout_setting, 30);
    }

    #[test]
    fn test_release_focus_restores_device_values() {
        let mut app = make_app();
        app.handle_device_event(DeviceEvent::Snapshot {
            seq: 1,
            snapshot: make_snapshot(),
        });

        app.focus = Some(Control::ScheduleStart);
        app.schedule_start_input = "2".to_string();
        app.release_focus();

        assert_eq!(app.focus, None);
        assert_eq!(app.schedule_start_input, "19:30");
    }

    #[test]
    fn test_stale_snapshot_is_dropped() {
        let mut app = make_app();
        let mut newer = make_snapshot();
        newer.max_brightness = 250;

        app.handle_device_event(DeviceEvent::Snapshot {
            seq: 5,
            snapshot: newer,
        });
        app.handle_device_event(DeviceEvent::Snapshot {
            seq: 3,
            snapshot: make_snapshot(),
        });

        assert_eq!(app.brightness_setting, 250);
    }

    #[test]
    fn test_equal_seq_result_is_dropped() {
        let mut app = make_app();
        app.handle_device_event(DeviceEvent::Snapshot {
            seq: 4,
            snapshot: make_snapshot(),
        });

        // A duplicate of an already-applied poll result is not newer and
        // must not take effect.
        app.handle_device_event(DeviceEvent::PollFailed {
            seq: 4,
            error: "timeout".to_string(),
        });
        assert!(!app.connection_lost);

        let mut repeat = make_snapshot();
        repeat.max_brightness = 250;
        app.handle_device_event(DeviceEvent::Snapshot {
            seq: 4,
            snapshot: repeat,
        });
        assert_eq!(app.brightness_setting, 200);
    }

    #[test]
    fn test_stale_poll_failure_does_not_flag_connection() {
        let mut app = make_app();
        app.handle_device_event(DeviceEvent::Snapshot {
            seq: 4,
            snapshot: make_snapshot(),
        });
        app.handle_device_event(DeviceEvent::PollFailed {
            seq: 2,
            error: "timeout".to_string(),
        });
        assert!(!app.connection_lost);

        app.handle_device_event(DeviceEvent::PollFailed {
            seq: 5,
            error: "timeout".to_string(),
        });
        assert!(app.connection_lost);
    }

    #[test]
    fn test_command_failure_toast_text() {
        let mut app = make_app();
        app.handle_device_event(DeviceEvent::CommandFailed {
            context: "Schedule".to_string(),
            detail: "bad value".to_string(),
        });

        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.message, "Schedule: bad value");
        assert!(toast.is_error);
    }

    #[test]
    fn test_new_toast_replaces_old() {
        let mut app = make_app();
        app.show_toast("first", false);
        app.show_toast("second", true);

        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.message, "second");
        assert!(toast.is_error);
    }

    #[test]
    fn test_toast_expiry() {
        let mut app = make_app();
        app.show_toast("hello", false);
        app.clean_expired_toast();
        assert!(app.toast.is_some());

        // Age the toast past its display time.
        if let Some(toast) = app.toast.as_mut() {
            toast.shown_at = Instant::now() - TOAST_DURATION - Duration::from_millis(100);
        }
        app.clean_expired_toast();
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_focus_cycle_wraps() {
        let mut app = make_app();
        app.focus_next();
        assert_eq!(app.focus, Some(Control::Brightness));

        for _ in 0..4 {
            app.focus_next();
        }
        assert_eq!(app.focus, Some(Control::Brightness));

        app.focus_prev();
        assert_eq!(app.focus, Some(Control::ScheduleEnd));
    }

    #[test]
    fn test_color_preset_cycle() {
        let mut app = make_app();
        let (name, r, g, b) = app.next_color_preset();
        assert_eq!((name, r, g, b), ("Warm", 255, 140, 60));

        for _ in 0..5 {
            app.next_color_preset();
        }
        let (name, ..) = app.next_color_preset();
        assert_eq!(name, "Soft yellow");
    }
}
