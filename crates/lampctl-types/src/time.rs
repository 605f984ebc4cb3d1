//! Parsing for the `HH:MM` schedule time fields.

use thiserror::Error;

/// Errors from parsing a schedule time field.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TimeParseError {
    /// The input was not two `:`-separated numbers.
    #[error("expected HH:MM, got \"{0}\"")]
    Format(String),
    /// The hour was outside 0..=23.
    #[error("hour {0} out of range (0-23)")]
    HourRange(u32),
    /// The minute was outside 0..=59.
    #[error("minute {0} out of range (0-59)")]
    MinuteRange(u32),
}

/// Parse a `HH:MM` string into an (hour, minute) pair.
///
/// A single-digit hour is accepted (`"7:05"`); the minute must be two
/// digits. Range checks match what the device enforces for its schedule
/// fields.
///
/// # Examples
///
/// ```
/// use lampctl_types::parse_hhmm;
///
/// assert_eq!(parse_hhmm("07:30").unwrap(), (7, 30));
/// assert_eq!(parse_hhmm("7:30").unwrap(), (7, 30));
/// assert!(parse_hhmm("24:00").is_err());
/// ```
pub fn parse_hhmm(input: &str) -> Result<(u8, u8), TimeParseError> {
    let format_err = || TimeParseError::Format(input.to_string());

    let (hour_part, minute_part) = input.split_once(':').ok_or_else(format_err)?;
    if hour_part.is_empty() || minute_part.len() != 2 {
        return Err(format_err());
    }

    let hour: u32 = hour_part.parse().map_err(|_| format_err())?;
    let minute: u32 = minute_part.parse().map_err(|_| format_err())?;

    if hour > 23 {
        return Err(TimeParseError::HourRange(hour));
    }
    if minute > 59 {
        return Err(TimeParseError::MinuteRange(minute));
    }

    Ok((hour as u8, minute as u8))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_times() {
        assert_eq!(parse_hhmm("00:00").unwrap(), (0, 0));
        assert_eq!(parse_hhmm("07:30").unwrap(), (7, 30));
        assert_eq!(parse_hhmm("7:05").unwrap(), (7, 5));
        assert_eq!(parse_hhmm("23:59").unwrap(), (23, 59));
    }

    #[test]
    fn test_parse_rejects_bad_format() {
        for input in ["", ":", "0730", "07:3", "07:305", "ab:cd", "07:-5"] {
            assert!(
                matches!(parse_hhmm(input), Err(TimeParseError::Format(_))),
                "input {:?} should be a format error",
                input
            );
        }
    }

    #[test]
    fn test_parse_rejects_out_of_range() {
        assert_eq!(parse_hhmm("24:00"), Err(TimeParseError::HourRange(24)));
        assert_eq!(parse_hhmm("12:60"), Err(TimeParseError::MinuteRange(60)));
    }
}
