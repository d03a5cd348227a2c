// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HVAC operating modes.

use std::fmt;
use std::str::FromStr;

use crate::error::ValueError;

/// Operating mode of a climate appliance.
///
/// The string form is the one used in configuration records and in the
/// composed remote codes (`mode:heat`).
///
/// # Examples
///
/// ```
/// use climate_remote_lib::types::HvacMode;
///
/// let mode: HvacMode = "fan_only".parse().unwrap();
/// assert_eq!(mode, HvacMode::FanOnly);
/// assert_eq!(mode.as_str(), "fan_only");
/// assert!(HvacMode::Off.is_off());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    /// Appliance is off.
    Off,
    /// Heating.
    Heat,
    /// Cooling.
    Cool,
    /// Heating or cooling to stay within a range.
    HeatCool,
    /// Appliance decides by itself.
    Auto,
    /// Dehumidifying.
    Dry,
    /// Only the fan is running.
    FanOnly,
}

impl HvacMode {
    /// All modes in their canonical order.
    pub const ALL: [Self; 7] = [
        Self::Off,
        Self::Heat,
        Self::Cool,
        Self::HeatCool,
        Self::Auto,
        Self::Dry,
        Self::FanOnly,
    ];

    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::HeatCool => "heat_cool",
            Self::Auto => "auto",
            Self::Dry => "dry",
            Self::FanOnly => "fan_only",
        }
    }

    /// Returns `true` for [`HvacMode::Off`].
    #[must_use]
    pub const fn is_off(&self) -> bool {
        matches!(self, Self::Off)
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HvacMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ValueError::InvalidHvacMode(s.to_string()))
    }
}
