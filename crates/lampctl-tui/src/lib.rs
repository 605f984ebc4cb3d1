//! Terminal dashboard for the PIR night-light controller.
//!
//! The binary polls the controller's `/status` endpoint on a fixed interval
//! and renders the lamp state, motion sensors, schedule and arming override
//! in a terminal UI. Adjustments are dispatched back to the device as
//! fire-and-forget commands.

pub mod config;
pub mod format;
pub mod tui;
