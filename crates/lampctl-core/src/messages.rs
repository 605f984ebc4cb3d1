//! Message types exchanged between the UI and the background worker.
//!
//! The UI thread sends [`Command`]s over a channel and receives
//! [`DeviceEvent`]s back. Commands are fire-and-forget: the worker reports
//! outcomes as events instead of blocking the UI on a response.

use lampctl_types::StatusSnapshot;

/// Commands sent from the UI thread to the device worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Set the brightness ceiling (0..=255).
    SetBrightness { value: u8 },
    /// Set the inactivity shutoff in seconds.
    SetTimeout { seconds: u32 },
    /// Store a new schedule window.
    SetSchedule {
        start_hour: u8,
        start_minute: u8,
        end_hour: u8,
        end_minute: u8,
    },
    /// Enable or disable the daily schedule.
    SetScheduleEnabled { enabled: bool },
    /// Set the lamp color. `name` is the preset label echoed back in the
    /// confirmation toast.
    SetColor {
        name: String,
        r: u8,
        g: u8,
        b: u8,
    },
    /// Arm the override for a number of hours.
    Arm { hours: u32 },
    /// Arm the override until the end of the day.
    ArmDay,
    /// Cancel the armed override.
    Disarm,
    /// Shut down the worker.
    Shutdown,
}

/// Events sent from the device worker back to the UI thread.
#[derive(Debug, Clone)]
pub enum DeviceEvent {
    /// A status poll completed.
    Snapshot {
        /// Poll sequence number, used to discard late responses that were
        /// overtaken by a newer poll.
        seq: u64,
        snapshot: StatusSnapshot,
    },
    /// A status poll failed.
    PollFailed { seq: u64, error: String },
    /// A command completed and deserves a confirmation toast.
    CommandOk { message: String },
    /// A command failed. `detail` is the device's error body for a rejected
    /// request, or a generic network message when the device was unreachable.
    CommandFailed { context: String, detail: String },
}
