//! Display formatting for device readings.

use lampctl_types::{ArmedIndicator, ScheduleIndicator};

/// Current brightness as a percentage of the 0..=255 PWM range, e.g. "50%".
pub fn brightness_percent(raw: u8) -> String {
    let percent = (raw as f64 / 255.0 * 100.0).round() as u32;
    format!("{}%", percent)
}

/// Zero-padded two-digit number, e.g. "05".
pub fn pad2(n: u8) -> String {
    format!("{:02}", n)
}

/// A schedule boundary as "HH:MM".
pub fn schedule_time(hour: u8, minute: u8) -> String {
    format!("{}:{}", pad2(hour), pad2(minute))
}

/// Lamp power label.
pub fn lamp_label(lights_on: bool) -> &'static str {
    if lights_on { "ON" } else { "OFF" }
}

/// Motion sensor label.
pub fn pir_label(triggered: bool) -> &'static str {
    if triggered { "motion" } else { "idle" }
}

/// Inactivity shutoff label, e.g. "30 s".
pub fn timeout_label(seconds: u32) -> String {
    format!("{} s", seconds)
}

/// Schedule state label.
pub fn schedule_label(indicator: ScheduleIndicator) -> &'static str {
    match indicator {
        ScheduleIndicator::Disabled => "disabled",
        ScheduleIndicator::Waiting => "waiting",
        ScheduleIndicator::Active => "active",
    }
}

/// Arming override label, e.g. "active (42 min left)".
pub fn armed_label(indicator: ArmedIndicator) -> String {
    match indicator {
        ArmedIndicator::Inactive => "inactive".to_string(),
        ArmedIndicator::Active { remaining_minutes } => {
            format!("active ({} min left)", remaining_minutes)
        }
    }
}
