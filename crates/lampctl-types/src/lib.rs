//! Platform-agnostic types for the lampctl night-light controller.
//!
//! This crate provides the shared data model consumed by the HTTP client
//! (lampctl-core) and the terminal dashboard (lampctl-tui):
//!
//! - [`StatusSnapshot`]: one authoritative status reading from the device
//! - [`ScheduleIndicator`] / [`ArmedIndicator`]: device-computed state
//!   folded into the small enums the UI renders from
//! - [`parse_hhmm`]: parsing for the `HH:MM` schedule time fields
//!
//! # Example
//!
//! ```
//! use lampctl_types::{ScheduleIndicator, parse_hhmm};
//!
//! assert_eq!(parse_hhmm("07:30").unwrap(), (7, 30));
//! assert_eq!(ScheduleIndicator::from_flags(true, true), ScheduleIndicator::Active);
//! ```

pub mod status;
pub mod time;

pub use status::{ArmedIndicator, ScheduleIndicator, StatusSnapshot};
pub use time::{TimeParseError, parse_hhmm};
