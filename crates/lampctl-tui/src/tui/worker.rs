//! Background worker for device communication.
//!
//! The worker owns the HTTP client and runs in its own Tokio task, keeping
//! the UI loop free of network waits. It communicates with the UI thread via
//! channels:
//!
//! - Receives [`Command`]s from the UI to perform operations
//! - Sends [`DeviceEvent`]s back to report results and status updates
//!
//! Each poll and each command runs in its own spawned task, so a slow device
//! never blocks the next poll tick. Polls carry a sequence number so the UI
//! can discard responses that were overtaken by a newer one.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, info};

use lampctl_core::{ClientError, DeviceClient};

use super::messages::{Command, DeviceEvent};

/// Error detail shown when the device did not answer at all.
const NETWORK_ERROR_DETAIL: &str = "Network error";

/// Background worker that polls the device and executes commands.
pub struct DeviceWorker {
    /// Receiver for commands from the UI thread.
    command_rx: mpsc::Receiver<Command>,
    /// Sender for events back to the UI thread.
    event_tx: mpsc::Sender<DeviceEvent>,
    /// HTTP client for the controller.
    client: DeviceClient,
    /// How often to poll `/status`.
    poll_interval: Duration,
    /// Sequence number of the most recently started poll.
    poll_seq: u64,
}

impl DeviceWorker {
    /// Create a new device worker.
    ///
    /// # Arguments
    ///
    /// * `command_rx` - Channel receiver for commands from the UI
    /// * `event_tx` - Channel sender for events to the UI
    /// * `client` - HTTP client for the controller
    /// * `poll_interval` - Delay between status polls
    pub fn new(
        command_rx: mpsc::Receiver<Command>,
        event_tx: mpsc::Sender<DeviceEvent>,
        client: DeviceClient,
        poll_interval: Duration,
    ) -> Self {
        Self {
            command_rx,
            event_tx,
            client,
            poll_interval,
            poll_seq: 0,
        }
    }

    /// Run the worker's main loop.
    ///
    /// This method consumes the worker and runs until a [`Command::Shutdown`]
    /// is received or the command channel is closed.
    pub async fn run(mut self) {
        info!(url = %self.client.base_url(), "DeviceWorker started");

        let mut ticker = interval(self.poll_interval);

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(Command::Shutdown) => {
                            info!("DeviceWorker received shutdown command");
                            break;
                        }
                        Some(cmd) => {
                            self.handle_command(cmd);
                        }
                        None => {
                            info!("Command channel closed, shutting down worker");
                            break;
                        }
                    }
                }
                _ = ticker.tick() => {
                    self.spawn_poll();
                }
            }
        }

        info!("DeviceWorker stopped");
    }

    /// Start a status poll in its own task.
    fn spawn_poll(&mut self) {
        self.poll_seq += 1;
        let seq = self.poll_seq;
        let client = self.client.clone();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            match client.status().await {
                Ok(snapshot) => {
                    let _ = event_tx.send(DeviceEvent::Snapshot { seq, snapshot }).await;
                }
                Err(e) => {
                    debug!(seq, error = %e, "Status poll failed");
                    let _ = event_tx
                        .send(DeviceEvent::PollFailed {
                            seq,
                            error: e.to_string(),
                        })
                        .await;
                }
            }
        });
    }

    /// Dispatch a single command in its own task.
    ///
    /// Slider updates (brightness, timeout) are silent: they fire on every
    /// keystroke and a toast per step would be noise. Everything else reports
    /// a confirmation or failure toast through the event channel.
    fn handle_command(&self, cmd: Command) {
        debug!(?cmd, "Dispatching command");

        let client = self.client.clone();
        let event_tx = self.event_tx.clone();

        match cmd {
            Command::SetBrightness { value } => {
                tokio::spawn(async move {
                    if let Err(e) = client.set_brightness(value).await {
                        debug!(value, error = %e, "Brightness update failed");
                    }
                });
            }
            Command::SetTimeout { seconds } => {
                tokio::spawn(async move {
                    if let Err(e) = client.set_timeout(seconds).await {
                        debug!(seconds, error = %e, "Timeout update failed");
                    }
                });
            }
            Command::SetSchedule {
                start_hour,
                start_minute,
                end_hour,
                end_minute,
            } => {
                tokio::spawn(async move {
                    let result = client
                        .set_schedule(start_hour, start_minute, end_hour, end_minute)
                        .await;
                    Self::report(event_tx, result, "Schedule", "Schedule saved".to_string()).await;
                });
            }
            Command::SetScheduleEnabled { enabled } => {
                tokio::spawn(async move {
                    let result = client.set_schedule_enabled(enabled).await;
                    let message = if enabled {
                        "Schedule enabled"
                    } else {
                        "Schedule disabled"
                    };
                    Self::report(event_tx, result, "Schedule", message.to_string()).await;
                });
            }
            Command::SetColor { name, r, g, b } => {
                tokio::spawn(async move {
                    let result = client.set_color(r, g, b).await;
                    Self::report(event_tx, result, "Color", format!("Color: {}", name)).await;
                });
            }
            Command::Arm { hours } => {
                tokio::spawn(async move {
                    let result = client.arm(hours).await;
                    Self::report(event_tx, result, "Arm", format!("Armed for {}h", hours)).await;
                });
            }
            Command::ArmDay => {
                tokio::spawn(async move {
                    let result = client.arm_day().await;
                    Self::report(
                        event_tx,
                        result,
                        "Arm",
                        "Armed until end of day".to_string(),
                    )
                    .await;
                });
            }
            Command::Disarm => {
                tokio::spawn(async move {
                    let result = client.disarm().await;
                    Self::report(event_tx, result, "Arm", "Disarmed".to_string()).await;
                });
            }
            Command::Shutdown => {
                // Handled in run() loop
            }
        }
    }

    /// Turn a command result into a toast event.
    ///
    /// A rejected request carries the device's plain-text explanation; any
    /// transport failure collapses to a generic network message.
    async fn report(
        event_tx: mpsc::Sender<DeviceEvent>,
        result: Result<(), ClientError>,
        context: &str,
        ok_message: String,
    ) {
        let event = match result {
            Ok(()) => DeviceEvent::CommandOk {
                message: ok_message,
            },
            Err(ClientError::Rejected { detail, .. }) => DeviceEvent::CommandFailed {
                context: context.to_string(),
                detail,
            },
            Err(e) => {
                debug!(error = %e, "Command transport failure");
                DeviceEvent::CommandFailed {
                    context: context.to_string(),
                    detail: NETWORK_ERROR_DETAIL.to_string(),
                }
            }
        };
        let _ = event_tx.send(event).await;
    }
}
