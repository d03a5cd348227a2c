// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate attribute keys.
//!
//! Attributes name the pieces of climate state that can be turned into a
//! remote code. The configured grouping list is a list of these keys.

use std::fmt;

/// A climate attribute that may contribute to a remote code.
///
/// Keys the library does not know are kept as [`Attribute::Other`] rather
/// than rejected; they compose to an empty token.
///
/// # Examples
///
/// ```
/// use climate_remote_lib::types::Attribute;
///
/// assert_eq!(Attribute::from("fan_mode"), Attribute::FanMode);
/// assert_eq!(Attribute::TemperatureRange.key(), "temperature_range");
/// assert_eq!(Attribute::from("dummy"), Attribute::Other("dummy".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Attribute {
    /// `hvac_mode`
    HvacMode,
    /// `fan_mode`
    FanMode,
    /// `swing_mode`
    SwingMode,
    /// `preset_mode`
    PresetMode,
    /// `temperature`
    Temperature,
    /// `temperature_range`
    TemperatureRange,
    /// `humidity`
    Humidity,
    /// Any key without a code mapping.
    Other(String),
}

impl Attribute {
    /// Attributes that may appear in a grouping list, in canonical order.
    pub const GROUPABLE: [Self; 6] = [
        Self::HvacMode,
        Self::FanMode,
        Self::SwingMode,
        Self::Temperature,
        Self::TemperatureRange,
        Self::Humidity,
    ];

    /// Returns the configuration key.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::HvacMode => "hvac_mode",
            Self::FanMode => "fan_mode",
            Self::SwingMode => "swing_mode",
            Self::PresetMode => "preset_mode",
            Self::Temperature => "temperature",
            Self::TemperatureRange => "temperature_range",
            Self::Humidity => "humidity",
            Self::Other(key) => key,
        }
    }

    /// Returns the short prefix used in remote codes, if any.
    #[must_use]
    pub const fn code_prefix(&self) -> Option<&'static str> {
        match self {
            Self::HvacMode => Some("mode"),
            Self::FanMode => Some("fan"),
            Self::SwingMode => Some("swing"),
            Self::PresetMode => Some("preset"),
            Self::Temperature => Some("temp"),
            Self::TemperatureRange => Some("temprange"),
            Self::Humidity => Some("humid"),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for Attribute {
    fn from(key: &str) -> Self {
        match key {
            "hvac_mode" => Self::HvacMode,
            "fan_mode" => Self::FanMode,
            "swing_mode" => Self::SwingMode,
            "preset_mode" | "preset" => Self::PresetMode,
            "temperature" => Self::Temperature,
            "temperature_range" => Self::TemperatureRange,
            "humidity" => Self::Humidity,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for Attribute {
    fn from(key: String) -> Self {
        Self::from(key.as_str())
    }
}

impl From<Attribute> for String {
    fn from(attribute: Attribute) -> Self {
        match attribute {
            Attribute::Other(key) => key,
            known => known.key().to_string(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
