//! The device status snapshot and the indicator states derived from it.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize, de};

/// One complete authoritative status reading from the device.
///
/// Received from `GET /status` every poll cycle. A snapshot is immutable
/// once received and is superseded wholesale by the next one; the device is
/// the single source of truth for every field here. Derived flags
/// (`within_schedule`, `armed_remaining`) are computed on the device, never
/// client-side.
///
/// Wire names are camelCase to match the firmware's hand-built JSON. Fields
/// that older firmware revisions do not emit (schedule, arming, color,
/// clock) default so either revision decodes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    /// Whether the lamp is currently on.
    pub lights_on: bool,
    /// Current effective output brightness (0..=255).
    pub brightness: u8,
    /// Configured brightness ceiling (0..=255).
    pub max_brightness: u8,
    /// Inactivity shutoff in seconds.
    pub timeout: u32,
    /// Live activity on motion sensor 1.
    #[serde(deserialize_with = "bool_or_int")]
    pub pir1: bool,
    /// Live activity on motion sensor 2.
    #[serde(deserialize_with = "bool_or_int")]
    pub pir2: bool,
    /// Human-readable status line.
    pub status: String,
    /// Device-reported error message; empty means no error.
    #[serde(default)]
    pub error: String,
    /// Whether the daily schedule is enabled.
    #[serde(default)]
    pub schedule_enabled: bool,
    /// Schedule window start hour (0..=23).
    #[serde(default)]
    pub schedule_start_hour: u8,
    /// Schedule window start minute (0..=59).
    #[serde(default)]
    pub schedule_start_minute: u8,
    /// Schedule window end hour (0..=23).
    #[serde(default)]
    pub schedule_end_hour: u8,
    /// Schedule window end minute (0..=59).
    #[serde(default)]
    pub schedule_end_minute: u8,
    /// Whether the device clock currently falls inside the schedule window.
    /// Computed by the device; the client only displays it.
    #[serde(default)]
    pub within_schedule: bool,
    /// Whether the temporary armed override is active.
    #[serde(default)]
    pub is_armed: bool,
    /// Minutes left on the armed countdown (device-computed).
    #[serde(default)]
    pub armed_remaining: u32,
    /// Device clock as a display string.
    #[serde(default)]
    pub current_time: String,
    /// Current lamp color, red channel.
    #[serde(default)]
    pub r: u8,
    /// Current lamp color, green channel.
    #[serde(default)]
    pub g: u8,
    /// Current lamp color, blue channel.
    #[serde(default)]
    pub b: u8,
}

impl StatusSnapshot {
    /// The device-reported error, or `None` when the field is empty.
    #[must_use]
    pub fn device_error(&self) -> Option<&str> {
        if self.error.is_empty() {
            None
        } else {
            Some(&self.error)
        }
    }

    /// Schedule window start as (hour, minute).
    #[must_use]
    pub fn schedule_start(&self) -> (u8, u8) {
        (self.schedule_start_hour, self.schedule_start_minute)
    }

    /// Schedule window end as (hour, minute).
    #[must_use]
    pub fn schedule_end(&self) -> (u8, u8) {
        (self.schedule_end_hour, self.schedule_end_minute)
    }

    /// Fold the schedule flags into the three-state indicator.
    #[must_use]
    pub fn schedule_indicator(&self) -> ScheduleIndicator {
        ScheduleIndicator::from_flags(self.schedule_enabled, self.within_schedule)
    }

    /// Fold the arming flags into the two-state indicator.
    #[must_use]
    pub fn armed_indicator(&self) -> ArmedIndicator {
        ArmedIndicator::from_flags(self.is_armed, self.armed_remaining)
    }
}

/// Three-state schedule indicator derived from device flags.
///
/// `within_schedule` is meaningless while the schedule is disabled, so
/// `Disabled` wins regardless of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleIndicator {
    /// Schedule is disabled.
    Disabled,
    /// Schedule is enabled but the current time is outside the window.
    Waiting,
    /// Schedule is enabled and the current time is inside the window.
    Active,
}

impl ScheduleIndicator {
    /// Derive the indicator from the device-computed flags.
    #[must_use]
    pub fn from_flags(enabled: bool, within_window: bool) -> Self {
        match (enabled, within_window) {
            (false, _) => Self::Disabled,
            (true, false) => Self::Waiting,
            (true, true) => Self::Active,
        }
    }
}

/// Two-state arming indicator derived from device flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArmedIndicator {
    /// No override active.
    Inactive,
    /// Override active with this many minutes remaining.
    Active {
        /// Minutes left on the countdown.
        remaining_minutes: u32,
    },
}

impl ArmedIndicator {
    /// Derive the indicator from the device-computed flags.
    #[must_use]
    pub fn from_flags(is_armed: bool, remaining_minutes: u32) -> Self {
        if is_armed {
            Self::Active { remaining_minutes }
        } else {
            Self::Inactive
        }
    }
}

/// Accept a JSON boolean or a 0/1 integer.
///
/// The firmware writes `digitalRead()` straight into the JSON for the PIR
/// fields, so they arrive as integers on some revisions and booleans on
/// others.
fn bool_or_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct BoolOrInt;

    impl de::Visitor<'_> for BoolOrInt {
        type Value = bool;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a boolean or a 0/1 integer")
        }

        fn visit_bool<E>(self, value: bool) -> Result<bool, E> {
            Ok(value)
        }

        fn visit_u64<E: de::Error>(self, value: u64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::custom(format!("expected 0 or 1, got {}", other))),
            }
        }

        fn visit_i64<E: de::Error>(self, value: i64) -> Result<bool, E> {
            match value {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::custom(format!("expected 0 or 1, got {}", other))),
            }
        }
    }

    deserializer.deserialize_any(BoolOrInt)
}
