//! HTTP client for the night-light controller's REST surface.
//!
//! The firmware exposes a small GET-only API: `/status` returns the JSON
//! snapshot, and every configuration change is a `/set/*` or `/arm*` path
//! with the values encoded in the URL. Set/arm endpoints answer non-2xx
//! with a plain-text error body on failure; the body is ignored on success.

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use lampctl_types::StatusSnapshot;

/// HTTP client for the lamp controller API.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    client: Client,
    base_url: String,
}

/// Error type for device client operations.
///
/// Every user-initiated command resolves to one of three outcomes: success,
/// [`Rejected`](ClientError::Rejected) (the device answered non-2xx, detail
/// is the response body), or [`Unreachable`](ClientError::Unreachable) (no
/// response at all). Status polls can additionally fail with
/// [`Malformed`](ClientError::Malformed) when the body does not decode.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The device did not answer at all.
    #[error("device not reachable at {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The device answered with a non-2xx status.
    #[error("device rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// The status payload did not decode as a snapshot.
    #[error("malformed status payload: {0}")]
    Malformed(#[source] reqwest::Error),

    /// Invalid base URL.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP client construction failed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type for device client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Request timeout; an unreachable device resolves to an error instead of
/// hanging a worker task forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

impl DeviceClient {
    /// Create a new device client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the controller (e.g. "http://lamp.local")
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, base_url })
    }

    /// Create a client with a custom reqwest Client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the current status snapshot.
    pub async fn status(&self) -> Result<StatusSnapshot> {
        let url = format!("{}/status", self.base_url);
        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| ClientError::Unreachable {
                    url: url.clone(),
                    source: e,
                })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_else(|_| status.to_string());
            return Err(ClientError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        response.json().await.map_err(ClientError::Malformed)
    }

    /// Set the brightness ceiling (0..=255).
    pub async fn set_brightness(&self, value: u8) -> Result<()> {
        self.command(&format!("/set/brightness/{}", value)).await
    }

    /// Set the inactivity shutoff in seconds.
    pub async fn set_timeout(&self, seconds: u32) -> Result<()> {
        self.command(&format!("/set/timeout/{}", seconds)).await
    }

    /// Set the daily schedule window in one combined call.
    pub async fn set_schedule(
        &self,
        start_hour: u8,
        start_minute: u8,
        end_hour: u8,
        end_minute: u8,
    ) -> Result<()> {
        self.command(&format!(
            "/set/schedule/{}/{}/{}/{}",
            start_hour, start_minute, end_hour, end_minute
        ))
        .await
    }

    /// Enable or disable the daily schedule.
    pub async fn set_schedule_enabled(&self, enabled: bool) -> Result<()> {
        self.command(&format!(
            "/set/schedule/enabled/{}",
            if enabled { 1 } else { 0 }
        ))
        .await
    }

    /// Set the lamp color.
    pub async fn set_color(&self, r: u8, g: u8, b: u8) -> Result<()> {
        self.command(&format!("/set/color/{}/{}/{}", r, g, b)).await
    }

    /// Arm the override for the given number of hours.
    pub async fn arm(&self, hours: u32) -> Result<()> {
        self.command(&format!("/arm/{}", hours)).await
    }

    /// Arm the override until the end of the day.
    pub async fn arm_day(&self) -> Result<()> {
        self.command("/arm/day").await
    }

    /// Cancel the armed override.
    pub async fn disarm(&self) -> Result<()> {
        self.command("/disarm").await
    }

    /// Issue a single set/arm command.
    ///
    /// One request, no retry. The success body is ignored; the failure body
    /// is the human-readable detail the device wants shown to the user.
    async fn command(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "Dispatching command");

        let response =
            self.client
                .get(&url)
                .send()
                .await
                .map_err(|e| ClientError::Unreachable {
                    url: url.clone(),
                    source: e,
                })?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let detail = response.text().await.unwrap_or_else(|_| status.to_string());
            Err(ClientError::Rejected {
                status: status.as_u16(),
                detail,
            })
        }
    }
}

/// Normalize and validate a base URL (strip trailing slash, require a scheme).
fn normalize_base_url(base_url: &str) -> Result<String> {
    let base_url = base_url.trim_end_matches('/').to_string();

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(ClientError::InvalidUrl(format!(
            "URL must start with http:// or https://, got: {}",
            base_url
        )));
    }

    Ok(base_url)
}
