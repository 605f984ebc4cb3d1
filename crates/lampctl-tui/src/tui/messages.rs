//! Message types for UI/worker communication.
//!
//! The wire-level definitions live in `lampctl-core` next to the client that
//! executes them; this module re-exports them for the TUI modules.

pub use lampctl_core::{Command, DeviceEvent};
