// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transmitters that send learned remote codes.
//!
//! The library never deals with infrared or RF waveforms. It asks a remote
//! entity of the hosting runtime to replay a code it has learned before,
//! through the `remote.send_command` service.
//!
//! # Transmitters
//!
//! - [`HomeAssistantTransmitter`]: calls the service over the REST API
//! - [`MqttTransmitter`]: publishes the service payload to a bridge topic
//!
//! Anything else (a test double, an in-process host) implements
//! [`Transmitter`] directly.

#[cfg(feature = "http")]
mod http;
#[cfg(feature = "mqtt")]
mod mqtt;

#[cfg(feature = "http")]
pub use http::{HomeAssistantConfig, HomeAssistantTransmitter};
#[cfg(feature = "mqtt")]
pub use mqtt::{MqttTransmitter, MqttTransmitterBuilder};

use serde::Serialize;

use crate::config::Target;
use crate::error::TransmitError;

/// Repeat and timing parameters of a send-code call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SendOptions {
    /// How many times each code is sent.
    pub num_repeats: u32,
    /// Seconds between codes.
    pub delay_secs: u32,
    /// Seconds each code is held.
    pub hold_secs: u32,
}

impl SendOptions {
    /// Options used by climate entities.
    pub const CLIMATE: Self = Self {
        num_repeats: 1,
        delay_secs: 1,
        hold_secs: 0,
    };

    /// Options used by buttons.
    pub const BUTTON: Self = Self {
        num_repeats: 1,
        delay_secs: 0,
        hold_secs: 0,
    };
}

impl Default for SendOptions {
    fn default() -> Self {
        Self::CLIMATE
    }
}

/// Payload of a `remote.send_command` service call.
///
/// # Examples
///
/// ```
/// use climate_remote_lib::config::Target;
/// use climate_remote_lib::protocol::{SendOptions, SendRequest};
///
/// let request = SendRequest::new(
///     vec!["mode:cool".to_string()],
///     "living_room_ac",
///     &Target::entity("remote.broadlink"),
///     SendOptions::CLIMATE,
/// );
///
/// assert_eq!(
///     serde_json::to_value(&request).unwrap(),
///     serde_json::json!({
///         "command": ["mode:cool"],
///         "device": "living_room_ac",
///         "entity_id": ["remote.broadlink"],
///         "num_repeats": 1,
///         "delay_secs": 1,
///         "hold_secs": 0
///     })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendRequest {
    /// Codes to send, in order.
    #[serde(rename = "command")]
    pub codes: Vec<String>,
    /// Device identifier the codes were learned under.
    pub device: String,
    /// Receivers.
    #[serde(flatten)]
    pub target: Target,
    /// Repeat and timing parameters.
    #[serde(flatten)]
    pub options: SendOptions,
}

impl SendRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(
        codes: Vec<String>,
        device: impl Into<String>,
        target: &Target,
        options: SendOptions,
    ) -> Self {
        Self {
            codes,
            device: device.into(),
            target: target.clone(),
            options,
        }
    }

    /// Builds the "not taught" error for this request.
    #[must_use]
    pub fn not_taught(&self) -> TransmitError {
        TransmitError::NotTaught {
            codes: self.codes.clone(),
            device: self.device.clone(),
        }
    }
}

/// Something that can replay learned remote codes.
///
/// Implementations must report a code the transmitter has never learned as
/// [`TransmitError::NotTaught`] when they can detect it, so callers can tell
/// it apart from transport failures.
#[allow(async_fn_in_trait)]
pub trait Transmitter {
    /// Sends the codes of `request`.
    ///
    /// # Errors
    ///
    /// Returns `TransmitError::NotTaught` for an unknown code, or another
    /// variant if the transmitter could not be reached.
    async fn send_command(&self, request: &SendRequest) -> Result<(), TransmitError>;
}

impl<T: Transmitter> Transmitter for std::sync::Arc<T> {
    async fn send_command(&self, request: &SendRequest) -> Result<(), TransmitError> {
        (**self).send_command(request).await
    }
}
