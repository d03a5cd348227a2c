// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relative humidity type.

use std::fmt;

use crate::error::ValueError;

/// Relative humidity as a whole percentage (0-100).
///
/// # Examples
///
/// ```
/// use climate_remote_lib::types::Humidity;
///
/// let humidity = Humidity::new(55).unwrap();
/// assert_eq!(humidity.value(), 55);
/// assert_eq!(humidity.to_string(), "55");
///
/// assert!(Humidity::new(101).is_err());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Humidity(u8);

impl Humidity {
    /// Minimum humidity (0%).
    pub const MIN: Self = Self(0);

    /// Maximum humidity (100%).
    pub const MAX: Self = Self(100);

    /// Initial target when target humidity is enabled, the host's default
    /// lower bound.
    pub const DEFAULT_TARGET: Self = Self(30);

    /// Creates a new humidity value.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if value exceeds 100.
    pub fn new(value: u8) -> Result<Self, ValueError> {
        if value > 100 {
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual: u16::from(value),
            });
        }
        Ok(Self(value))
    }

    /// Converts a sensor reading, truncating the fractional part.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if the reading is not within 0-100.
    pub fn from_reading(reading: f64) -> Result<Self, ValueError> {
        let truncated = reading.trunc();
        if !(0.0..=100.0).contains(&truncated) {
            // Saturating conversion, only used for the error report.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let actual = truncated.clamp(0.0, f64::from(u16::MAX)) as u16;
            return Err(ValueError::OutOfRange {
                min: 0,
                max: 100,
                actual,
            });
        }
        // Safe: checked to be within 0-100 above
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Ok(Self(truncated as u8))
    }

    /// Returns the percentage.
    #[must_use]
    pub const fn value(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for Humidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for Humidity {
    type Error = ValueError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Humidity> for u8 {
    fn from(value: Humidity) -> Self {
        value.0
    }
}
