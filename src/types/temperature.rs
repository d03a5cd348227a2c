// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature control configuration types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ValueError};

/// How the appliance accepts temperature requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureMode {
    /// Temperature cannot be controlled.
    #[default]
    None,
    /// A single target temperature.
    Target,
    /// A low/high temperature range.
    Range,
}

impl TemperatureMode {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Target => "target",
            Self::Range => "range",
        }
    }
}

impl fmt::Display for TemperatureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemperatureMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "target" => Ok(Self::Target),
            "range" => Ok(Self::Range),
            _ => Err(ValueError::InvalidTemperatureMode(s.to_string())),
        }
    }
}

/// Unit the appliance works in.
///
/// Serialized as `"c"` / `"f"` in configuration records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    #[default]
    #[serde(rename = "c", alias = "°C")]
    Celsius,
    /// Degrees Fahrenheit.
    #[serde(rename = "f", alias = "°F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Returns the display symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "c" | "C" | "°C" => Ok(Self::Celsius),
            "f" | "F" | "°F" => Ok(Self::Fahrenheit),
            _ => Err(ValueError::InvalidTemperatureUnit(s.to_string())),
        }
    }
}

/// Temperature capability of the appliance, either for all modes or as a
/// per-HVAC-mode override.
///
/// # Examples
///
/// ```
/// use climate_remote_lib::types::{TemperatureConf, TemperatureMode};
///
/// let conf = TemperatureConf::target(18.0, 28.0);
/// assert_eq!(conf.mode, TemperatureMode::Target);
/// assert!(TemperatureConf::none().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureConf {
    /// Which kind of temperature control is available.
    pub mode: TemperatureMode,
    /// Lowest temperature the appliance accepts.
    #[serde(default = "TemperatureConf::default_min")]
    pub min: f64,
    /// Highest temperature the appliance accepts.
    #[serde(default = "TemperatureConf::default_max")]
    pub max: f64,
}

impl TemperatureConf {
    /// Default lower bound.
    pub const DEFAULT_MIN: f64 = 16.0;
    /// Default upper bound.
    pub const DEFAULT_MAX: f64 = 30.0;

    const fn default_min() -> f64 {
        Self::DEFAULT_MIN
    }

    const fn default_max() -> f64 {
        Self::DEFAULT_MAX
    }

    /// No temperature control, default bounds.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            mode: TemperatureMode::None,
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }

    /// Single target temperature between `min` and `max`.
    #[must_use]
    pub const fn target(min: f64, max: f64) -> Self {
        Self {
            mode: TemperatureMode::Target,
            min,
            max,
        }
    }

    /// Low/high range between `min` and `max`.
    #[must_use]
    pub const fn range(min: f64, max: f64) -> Self {
        Self {
            mode: TemperatureMode::Range,
            min,
            max,
        }
    }

    /// Returns `true` if temperature cannot be controlled.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self.mode, TemperatureMode::None)
    }

    /// Checks that `min <= max`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidTemperatureBounds` otherwise.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidTemperatureBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for TemperatureConf {
    fn default() -> Self {
        Self::none()
    }
}
