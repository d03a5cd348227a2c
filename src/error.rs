// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the climate remote library.
//!
//! Only [`ValueError`] ever escapes a climate setter: it describes a bad
//! request from the caller. Failures talking to the transmitter are
//! [`TransmitError`]s and are absorbed by the
//! [`Dispatcher`](crate::dispatch::Dispatcher), which logs them instead.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A caller-supplied value was rejected.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// The configuration record is invalid.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Sending a code through the transmitter failed.
    #[error("transmit error: {0}")]
    Transmit(#[from] TransmitError),

    /// A sensor or stored value could not be parsed.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),
}

/// Errors related to caller-supplied values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A temperature range request did not carry both bounds.
    #[error("temperature_low and temperature_high must be provided")]
    MissingTemperatureBound,

    /// A requested temperature is NaN or infinite.
    #[error("temperature {0} is not a finite number")]
    NonFiniteTemperature(f64),

    /// The low bound of a temperature range is above the high bound.
    #[error("temperature range low bound {low} is above high bound {high}")]
    InvertedTemperatureRange {
        /// Requested low bound.
        low: f64,
        /// Requested high bound.
        high: f64,
    },

    /// A numeric value is outside the allowed range.
    #[error("value {actual} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Minimum allowed value.
        min: u16,
        /// Maximum allowed value.
        max: u16,
        /// The actual value that was provided.
        actual: u16,
    },

    /// The requested mode is not among the configured ones.
    #[error("{kind} mode {value:?} is not configured")]
    UnsupportedMode {
        /// Which mode list was consulted (`hvac`, `fan`, `swing`, `preset`).
        kind: &'static str,
        /// The rejected value.
        value: String,
    },

    /// An unknown HVAC mode string.
    #[error("invalid hvac mode: {0}")]
    InvalidHvacMode(String),

    /// An unknown temperature mode string.
    #[error("invalid temperature mode: {0}")]
    InvalidTemperatureMode(String),

    /// An unknown temperature unit string.
    #[error("invalid temperature unit: {0}")]
    InvalidTemperatureUnit(String),

    /// An unknown swing mode string.
    #[error("invalid swing mode: {0}")]
    InvalidSwingMode(String),
}

/// Errors found while loading or validating a configuration record.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The record could not be decoded.
    #[error("invalid configuration record: {0}")]
    Json(#[from] serde_json::Error),

    /// No transmitter device identifier was given.
    #[error("device identifier is empty")]
    MissingDevice,

    /// The target has no entity, device or area.
    #[error("target is empty")]
    EmptyTarget,

    /// No HVAC mode was configured.
    #[error("hvac modes are empty")]
    EmptyHvacModes,

    /// A temperature configuration has min above max.
    #[error("temperature min {min} is above max {max}")]
    InvalidTemperatureBounds {
        /// Configured minimum.
        min: f64,
        /// Configured maximum.
        max: f64,
    },

    /// The temperature step is outside (0, 10].
    #[error("temperature step {0} is out of range (0, 10]")]
    InvalidTemperatureStep(f64),
}

/// Errors reported by a [`Transmitter`](crate::protocol::Transmitter).
#[derive(Debug, Error)]
pub enum TransmitError {
    /// The transmitter was reached but has never learned the code.
    #[error("command {codes:?} for device {device:?} is not taught")]
    NotTaught {
        /// The codes that were requested.
        codes: Vec<String>,
        /// The device identifier understood by the transmitter.
        device: String,
    },

    /// HTTP request failed.
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// MQTT publish failed.
    #[cfg(feature = "mqtt")]
    #[error("MQTT error: {0}")]
    Mqtt(#[from] rumqttc::ClientError),

    /// The transmitter could not be reached or refused the call.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Authentication against the host failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The request payload could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),
}

impl TransmitError {
    /// Returns `true` if the code was never taught to the transmitter.
    #[must_use]
    pub fn is_not_taught(&self) -> bool {
        matches!(self, Self::NotTaught { .. })
    }
}

/// Errors related to parsing incoming values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// A sensor reported a state that is not a number.
    #[error("invalid sensor value {value:?}: {message}")]
    InvalidSensorValue {
        /// The raw state text.
        value: String,
        /// Description of the failure.
        message: String,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;
