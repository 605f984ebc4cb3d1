//! HTTP client and messaging for the lampctl night-light controller.
//!
//! This crate provides the pieces shared by any frontend for the device:
//!
//! - [`DeviceClient`]: the HTTP client for the controller's REST surface
//!   (`/status`, `/set/*`, `/arm*`)
//! - [`Command`] / [`DeviceEvent`]: the message types used between a UI
//!   thread and the background worker that owns the client
//!
//! # Example
//!
//! ```no_run
//! use lampctl_core::DeviceClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DeviceClient::new("http://lamp.local")?;
//!
//! let snapshot = client.status().await?;
//! println!("Lamp on: {}", snapshot.lights_on);
//!
//! client.set_brightness(120).await?;
//! Ok(())
//! # }
//! ```

pub mod client;
pub mod messages;

pub use client::{ClientError, DeviceClient};
pub use messages::{Command, DeviceEvent};
