// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transmitter calling `remote.send_command` over the host's REST API.

use std::time::Duration;

use reqwest::{Client, StatusCode};

use crate::error::TransmitError;
use crate::protocol::{SendRequest, Transmitter};

/// Service endpoint, relative to the base URL.
const SEND_COMMAND_PATH: &str = "/api/services/remote/send_command";

/// Connection parameters of the host REST API.
///
/// # Examples
///
/// ```
/// use climate_remote_lib::protocol::HomeAssistantConfig;
/// use std::time::Duration;
///
/// let config = HomeAssistantConfig::new("http://homeassistant.local:8123/", "token")
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.base_url(), "http://homeassistant.local:8123");
/// assert_eq!(
///     config.service_url(),
///     "http://homeassistant.local:8123/api/services/remote/send_command"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct HomeAssistantConfig {
    base_url: String,
    token: String,
    timeout: Duration,
}

impl HomeAssistantConfig {
    /// Default request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a configuration from a base URL and a long-lived access token.
    ///
    /// A base URL without a scheme gets `http://`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url
        } else {
            format!("http://{base_url}")
        };
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the full URL of the send-command service.
    #[must_use]
    pub fn service_url(&self) -> String {
        format!("{}{SEND_COMMAND_PATH}", self.base_url)
    }

    /// Creates the transmitter.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn into_transmitter(self) -> Result<HomeAssistantTransmitter, TransmitError> {
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(TransmitError::Http)?;

        Ok(HomeAssistantTransmitter {
            url: self.service_url(),
            token: self.token,
            client,
        })
    }
}

/// Sends codes through the host's `remote.send_command` service.
///
/// The host answers 400 when the remote entity rejects the call, which is
/// how an unlearned code surfaces; that status maps to
/// [`TransmitError::NotTaught`].
///
/// # Examples
///
/// ```no_run
/// use climate_remote_lib::config::Target;
/// use climate_remote_lib::protocol::{HomeAssistantConfig, SendOptions, SendRequest, Transmitter};
///
/// # async fn example() -> climate_remote_lib::Result<()> {
/// let transmitter = HomeAssistantConfig::new("http://homeassistant.local:8123", "token")
///     .into_transmitter()?;
/// let request = SendRequest::new(
///     vec!["off".to_string()],
///     "bedroom_ac",
///     &Target::entity("remote.broadlink"),
///     SendOptions::CLIMATE,
/// );
/// transmitter.send_command(&request).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HomeAssistantTransmitter {
    url: String,
    token: String,
    client: Client,
}

impl HomeAssistantTransmitter {
    /// Returns the service URL requests are posted to.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Transmitter for HomeAssistantTransmitter {
    async fn send_command(&self, request: &SendRequest) -> Result<(), TransmitError> {
        tracing::debug!(url = %self.url, codes = ?request.codes, "Posting send_command");

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await
            .map_err(TransmitError::Http)?;

        match response.status() {
            StatusCode::UNAUTHORIZED => Err(TransmitError::AuthenticationFailed),
            StatusCode::BAD_REQUEST => Err(request.not_taught()),
            status if !status.is_success() => Err(TransmitError::ConnectionFailed(format!(
                "HTTP {} - {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ))),
            _ => Ok(()),
        }
    }
}
