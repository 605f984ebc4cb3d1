//! Keyboard input handling for the TUI.
//!
//! Translates keyboard events into high-level actions and applies those
//! actions to the application state.
//!
//! # Key Bindings
//!
//! | Key            | Action                        |
//! |----------------|-------------------------------|
//! | `q`            | Quit                          |
//! | `Tab`          | Focus next control            |
//! | `Shift+Tab`    | Focus previous control        |
//! | `Esc`          | Release focus, discard edit   |
//! | `←` `↓` / `-`  | Decrease focused slider       |
//! | `→` `↑` / `+`  | Increase focused slider       |
//! | `Enter`        | Save the edited schedule      |
//! | `e`            | Toggle schedule on/off        |
//! | `1` `4` `8`    | Arm override for N hours      |
//! | `d`            | Arm override until end of day |
//! | `x`            | Disarm override               |
//! | `c`            | Cycle color preset            |
//! | `?`            | Toggle help                   |

use crossterm::event::KeyCode;

use super::app::{App, Control};
use super::messages::Command;

/// Slider step for the brightness ceiling.
const BRIGHTNESS_STEP: u8 = 5;
/// Lowest usable brightness ceiling; below this the LEDs stay dark.
const BRIGHTNESS_MIN: u8 = 10;

/// Slider step for the inactivity shutoff.
const TIMEOUT_STEP: u32 = 5;
/// Shutoff bounds the device accepts, in seconds.
const TIMEOUT_MIN: u32 = 3;
const TIMEOUT_MAX: u32 = 300;

/// User actions that can be triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Toggle the help overlay.
    ToggleHelp,
    /// Move the edit lock to the next control.
    FocusNext,
    /// Move the edit lock to the previous control.
    FocusPrev,
    /// Release the edit lock and discard any half-typed edit.
    ReleaseFocus,
    /// Increase the focused slider.
    Increase,
    /// Decrease the focused slider.
    Decrease,
    /// Save the edited schedule window.
    CommitSchedule,
    /// Toggle the schedule on or off.
    ToggleSchedule,
    /// Arm the override for a number of hours.
    Arm(u32),
    /// Arm the override until the end of the day.
    ArmDay,
    /// Disarm the override.
    Disarm,
    /// Apply the next color preset.
    CycleColor,
    /// Input character for a time field.
    TextInput(char),
    /// Backspace in a time field.
    TextBackspace,
    /// No action (unrecognized key).
    None,
}

/// Map a key code to an action.
///
/// # Arguments
///
/// * `key` - The key code from a keyboard event
/// * `editing_text` - Whether a time field currently holds the edit lock
pub fn handle_key(key: KeyCode, editing_text: bool) -> Action {
    // While a time field is focused, most keys feed the edit buffer.
    if editing_text {
        return match key {
            KeyCode::Enter => Action::CommitSchedule,
            KeyCode::Esc => Action::ReleaseFocus,
            KeyCode::Backspace => Action::TextBackspace,
            KeyCode::Tab => Action::FocusNext,
            KeyCode::BackTab => Action::FocusPrev,
            KeyCode::Char(c) if c.is_ascii_digit() || c == ':' => Action::TextInput(c),
            _ => Action::None,
        };
    }

    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Tab => Action::FocusNext,
        KeyCode::BackTab => Action::FocusPrev,
        KeyCode::Esc => Action::ReleaseFocus,
        KeyCode::Left | KeyCode::Down | KeyCode::Char('-') => Action::Decrease,
        KeyCode::Right | KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => Action::Increase,
        KeyCode::Char('e') => Action::ToggleSchedule,
        KeyCode::Char('1') => Action::Arm(1),
        KeyCode::Char('4') => Action::Arm(4),
        KeyCode::Char('8') => Action::Arm(8),
        KeyCode::Char('d') => Action::ArmDay,
        KeyCode::Char('x') => Action::Disarm,
        KeyCode::Char('c') => Action::CycleColor,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

/// Apply an action to the application state.
///
/// Returns a command to dispatch to the worker, if the action needs one.
pub fn apply_action(app: &mut App, action: Action) -> Option<Command> {
    match action {
        Action::Quit => {
            app.quit();
            None
        }
        Action::ToggleHelp => {
            app.show_help = !app.show_help;
            None
        }
        Action::FocusNext => {
            app.focus_next();
            None
        }
        Action::FocusPrev => {
            app.focus_prev();
            None
        }
        Action::ReleaseFocus => {
            app.release_focus();
            None
        }
        Action::Increase => adjust_slider(app, true),
        Action::Decrease => adjust_slider(app, false),
        Action::CommitSchedule => commit_schedule(app),
        Action::ToggleSchedule => {
            let enabled = !app.snapshot.as_ref()?.schedule_enabled;
            Some(Command::SetScheduleEnabled { enabled })
        }
        Action::Arm(hours) => Some(Command::Arm { hours }),
        Action::ArmDay => Some(Command::ArmDay),
        Action::Disarm => Some(Command::Disarm),
        Action::CycleColor => {
            let (name, r, g, b) = app.next_color_preset();
            Some(Command::SetColor {
                name: name.to_string(),
                r,
                g,
                b,
            })
        }
        Action::TextInput(c) => {
            if let Some(buffer) = app.focused_text_buffer()
                && buffer.len() < 5
            {
                buffer.push(c);
            }
            None
        }
        Action::TextBackspace => {
            if let Some(buffer) = app.focused_text_buffer() {
                buffer.pop();
            }
            None
        }
        Action::None => None,
    }
}

/// Adjust the focused slider and return the command to push the new value.
///
/// Sliders dispatch on every step, matching the live-update behavior of the
/// device's own controls.
fn adjust_slider(app: &mut App, increase: bool) -> Option<Command> {
    match app.focus {
        Some(Control::Brightness) => {
            let value = if increase {
                app.brightness_setting.saturating_add(BRIGHTNESS_STEP)
            } else {
                app.brightness_setting.saturating_sub(BRIGHTNESS_STEP)
            }
            .clamp(BRIGHTNESS_MIN, u8::MAX);
            app.brightness_setting = value;
            Some(Command::SetBrightness { value })
        }
        Some(Control::Timeout) => {
            let seconds = if increase {
                app.timeout_setting.saturating_add(TIMEOUT_STEP)
            } else {
                app.timeout_setting.saturating_sub(TIMEOUT_STEP)
            }
            .clamp(TIMEOUT_MIN, TIMEOUT_MAX);
            app.timeout_setting = seconds;
            Some(Command::SetTimeout { seconds })
        }
        _ => None,
    }
}

/// Toast shown when a schedule edit does not parse as a time of day.
const BAD_TIME_TOAST: &str = "Schedule: invalid time (HH:MM)";

/// Validate the schedule edit buffers and build the save command.
fn commit_schedule(app: &mut App) -> Option<Command> {
    if !app.focus.is_some_and(Control::is_text) {
        return None;
    }

    let start = match lampctl_types::parse_hhmm(&app.schedule_start_input) {
        Ok(t) => t,
        Err(_) => {
            app.show_toast(BAD_TIME_TOAST, true);
            return None;
        }
    };
    let end = match lampctl_types::parse_hhmm(&app.schedule_end_input) {
        Ok(t) => t,
        Err(_) => {
            app.show_toast(BAD_TIME_TOAST, true);
            return None;
        }
    };

    app.focus = None;
    Some(Command::SetSchedule {
        start_hour: start.0,
        start_minute: start.1,
        end_hour: end.0,
        end_minute: end.1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn make_app() -> App {
        let (tx, _rx) = mpsc::channel(8);
        let (_etx, erx) = mpsc::channel(8);
        App::new(tx, erx)
    }

    #[test]
    fn test_key_mapping_basic() {
        assert_eq!(handle_key(KeyCode::Char('q'), false), Action::Quit);
        assert_eq!(handle_key(KeyCode::Tab, false), Action::FocusNext);
        assert_eq!(handle_key(KeyCode::BackTab, false), Action::FocusPrev);
        assert_eq!(handle_key(KeyCode::Char('e'), false), Action::ToggleSchedule);
        assert_eq!(handle_key(KeyCode::Char('4'), false), Action::Arm(4));
        assert_eq!(handle_key(KeyCode::Char('d'), false), Action::ArmDay);
        assert_eq!(handle_key(KeyCode::Char('x'), false), Action::Disarm);
        assert_eq!(handle_key(KeyCode::Char('c'), false), Action::CycleColor);
        assert_eq!(handle_key(KeyCode::Char('?'), false), Action::ToggleHelp);
    }

    #[test]
    fn test_arrow_keys_adjust_sliders() {
        assert_eq!(handle_key(KeyCode::Left, false), Action::Decrease);
        assert_eq!(handle_key(KeyCode::Down, false), Action::Decrease);
        assert_eq!(handle_key(KeyCode::Right, false), Action::Increase);
        assert_eq!(handle_key(KeyCode::Up, false), Action::Increase);
    }

    #[test]
    fn test_key_mapping_while_editing() {
        assert_eq!(handle_key(KeyCode::Char('1'), true), Action::TextInput('1'));
        assert_eq!(handle_key(KeyCode::Char(':'), true), Action::TextInput(':'));
        assert_eq!(handle_key(KeyCode::Enter, true), Action::CommitSchedule);
        assert_eq!(handle_key(KeyCode::Esc, true), Action::ReleaseFocus);
        // Command keys are swallowed while typing a time.
        assert_eq!(handle_key(KeyCode::Char('q'), true), Action::None);
    }

    #[test]
    fn test_brightness_adjust_dispatches_and_clamps() {
        let mut app = make_app();
        app.focus = Some(Control::Brightness);
        app.brightness_setting = 250;

        let cmd = apply_action(&mut app, Action::Increase);
        assert_eq!(cmd, Some(Command::SetBrightness { value: 255 }));
        assert_eq!(app.brightness_setting, 255);

        app.brightness_setting = 12;
        let cmd = apply_action(&mut app, Action::Decrease);
        assert_eq!(cmd, Some(Command::SetBrightness { value: 10 }));
    }

    #[test]
    fn test_timeout_adjust_clamps_to_device_range() {
        let mut app = make_app();
        app.focus = Some(Control::Timeout);
        app.timeout_setting = 4;

        let cmd = apply_action(&mut app, Action::Decrease);
        assert_eq!(cmd, Some(Command::SetTimeout { seconds: 3 }));

        app.timeout_setting = 298;
        let cmd = apply_action(&mut app, Action::Increase);
        assert_eq!(cmd, Some(Command::SetTimeout { seconds: 300 }));
    }

    #[test]
    fn test_adjust_without_focus_is_noop() {
        let mut app = make_app();
        assert_eq!(apply_action(&mut app, Action::Increase), None);
        assert_eq!(apply_action(&mut app, Action::Decrease), None);
    }

    #[test]
    fn test_commit_schedule_builds_command() {
        let mut app = make_app();
        app.focus = Some(Control::ScheduleEnd);
        app.schedule_start_input = "19:30".to_string();
        app.schedule_end_input = "06:00".to_string();

        let cmd = apply_action(&mut app, Action::CommitSchedule);
        assert_eq!(
            cmd,
            Some(Command::SetSchedule {
                start_hour: 19,
                start_minute: 30,
                end_hour: 6,
                end_minute: 0,
            })
        );
        assert_eq!(app.focus, None);
    }

    #[test]
    fn test_commit_schedule_rejects_bad_time() {
        let mut app = make_app();
        app.focus = Some(Control::ScheduleStart);
        app.schedule_start_input = "25:00".to_string();
        app.schedule_end_input = "06:00".to_string();

        let cmd = apply_action(&mut app, Action::CommitSchedule);
        assert_eq!(cmd, None);

        let toast = app.toast.as_ref().unwrap();
        assert!(toast.is_error);
        assert_eq!(toast.message, "Schedule: invalid time (HH:MM)");
        // The lock stays so the user can fix the input.
        assert_eq!(app.focus, Some(Control::ScheduleStart));
    }

    #[test]
    fn test_text_input_caps_buffer_length() {
        let mut app = make_app();
        app.focus = Some(Control::ScheduleStart);
        app.schedule_start_input = "19:30".to_string();

        apply_action(&mut app, Action::TextInput('1'));
        assert_eq!(app.schedule_start_input, "19:30");

        apply_action(&mut app, Action::TextBackspace);
        assert_eq!(app.schedule_start_input, "19:3");
    }

    #[test]
    fn test_cycle_color_carries_preset_name() {
        let mut app = make_app();
        let cmd = apply_action(&mut app, Action::CycleColor);
        assert_eq!(
            cmd,
            Some(Command::SetColor {
                name: "Warm".to_string(),
                r: 255,
                g: 140,
                b: 60,
            })
        );
    }

    #[test]
    fn test_toggle_schedule_requires_snapshot() {
        let mut app = make_app();
        assert_eq!(apply_action(&mut app, Action::ToggleSchedule), None);
    }
}
