// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parsing of sensor entity states.
//!
//! The host reports sensor states as text. Besides numbers, a sensor may
//! report one of two placeholder states; both mean "no reading".

use crate::error::ParseError;

/// State of a sensor whose integration is not loaded.
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// State of a sensor that has not reported yet.
pub const STATE_UNKNOWN: &str = "unknown";

/// Parses a sensor state.
///
/// Returns `Ok(None)` for the placeholder states.
///
/// # Errors
///
/// Returns `ParseError::InvalidSensorValue` if the state is neither a
/// placeholder nor a finite number.
///
/// # Examples
///
/// ```
/// use climate_remote_lib::sensor::parse_sensor_state;
///
/// assert_eq!(parse_sensor_state("21.5").unwrap(), Some(21.5));
/// assert_eq!(parse_sensor_state("unavailable").unwrap(), None);
/// assert!(parse_sensor_state("warm").is_err());
/// ```
pub fn parse_sensor_state(state: &str) -> Result<Option<f64>, ParseError> {
    if state == STATE_UNAVAILABLE || state == STATE_UNKNOWN {
        return Ok(None);
    }
    let value: f64 = state
        .trim()
        .parse()
        .map_err(|e: std::num::ParseFloatError| ParseError::InvalidSensorValue {
            value: state.to_string(),
            message: e.to_string(),
        })?;
    if !value.is_finite() {
        return Err(ParseError::InvalidSensorValue {
            value: state.to_string(),
            message: "not a finite number".to_string(),
        });
    }
    Ok(Some(value))
}
