// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate capabilities and their resolution per HVAC mode.
//!
//! Which controls an entity exposes depends on the configuration and, for
//! temperature, on the current HVAC mode: a mode may carry its own
//! temperature configuration (typically "none" for `off`, `dry` and
//! `fan_only`). The functions here recompute the active set and filter the
//! grouping list down to attributes that are currently meaningful.

use indexmap::IndexMap;

use crate::config::{ClimateConfig, HvacModeConf};
use crate::types::{Attribute, HvacMode, TemperatureConf};

/// Controls a climate entity currently exposes.
///
/// # Examples
///
/// ```
/// use climate_remote_lib::ClimateFeatures;
///
/// let features = ClimateFeatures {
///     target_temperature: true,
///     fan_mode: true,
///     ..ClimateFeatures::default()
/// };
/// assert_eq!(features.bits(), 1 | 8);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
// Each flag is an independent control advertised to the host.
#[allow(clippy::struct_excessive_bools)]
pub struct ClimateFeatures {
    /// A single target temperature can be set.
    pub target_temperature: bool,
    /// A low/high temperature range can be set.
    pub target_temperature_range: bool,
    /// A target humidity can be set.
    pub target_humidity: bool,
    /// A fan mode can be selected.
    pub fan_mode: bool,
    /// A preset can be selected.
    pub preset_mode: bool,
    /// A swing state can be selected.
    pub swing_mode: bool,
}

impl ClimateFeatures {
    /// Bit for [`ClimateFeatures::target_temperature`].
    pub const TARGET_TEMPERATURE: u32 = 1;
    /// Bit for [`ClimateFeatures::target_temperature_range`].
    pub const TARGET_TEMPERATURE_RANGE: u32 = 2;
    /// Bit for [`ClimateFeatures::target_humidity`].
    pub const TARGET_HUMIDITY: u32 = 4;
    /// Bit for [`ClimateFeatures::fan_mode`].
    pub const FAN_MODE: u32 = 8;
    /// Bit for [`ClimateFeatures::preset_mode`].
    pub const PRESET_MODE: u32 = 16;
    /// Bit for [`ClimateFeatures::swing_mode`].
    pub const SWING_MODE: u32 = 32;

    /// Features that do not depend on the HVAC mode.
    ///
    /// Temperature flags are left unset; they are filled in by
    /// [`ClimateState::apply_temperature_conf`](crate::state::ClimateState::apply_temperature_conf).
    #[must_use]
    pub fn from_config(config: &ClimateConfig) -> Self {
        Self {
            target_temperature: false,
            target_temperature_range: false,
            target_humidity: config.humidity,
            fan_mode: !config.fan_modes.is_empty(),
            preset_mode: !config.preset_modes.is_empty(),
            swing_mode: !config.swing.stateful_modes().is_empty(),
        }
    }

    /// Encodes the flags as the host's supported-features bitmask.
    #[must_use]
    pub fn bits(&self) -> u32 {
        [
            (self.target_temperature, Self::TARGET_TEMPERATURE),
            (self.target_temperature_range, Self::TARGET_TEMPERATURE_RANGE),
            (self.target_humidity, Self::TARGET_HUMIDITY),
            (self.fan_mode, Self::FAN_MODE),
            (self.preset_mode, Self::PRESET_MODE),
            (self.swing_mode, Self::SWING_MODE),
        ]
        .into_iter()
        .filter(|(enabled, _)| *enabled)
        .fold(0, |bits, (_, bit)| bits | bit)
    }
}

/// Returns the temperature configuration in effect for `hvac_mode`.
///
/// The mode's own override wins; otherwise `base` applies. A mode missing
/// from the table also falls back to `base`.
#[must_use]
pub fn resolve_temperature_conf<'a>(
    hvac_mode: HvacMode,
    hvac_modes: &'a IndexMap<HvacMode, HvacModeConf>,
    base: &'a TemperatureConf,
) -> &'a TemperatureConf {
    hvac_modes
        .get(&hvac_mode)
        .and_then(|conf| conf.temperature.as_ref())
        .unwrap_or(base)
}

/// Filters the configured grouping list down to attributes whose backing
/// capability is active.
///
/// Configuration order is kept: it is the order of tokens in composite
/// codes.
#[must_use]
pub fn active_grouping_attributes(
    configured: &[Attribute],
    features: &ClimateFeatures,
    fan_modes: &[String],
    swing_modes: &[String],
) -> Vec<Attribute> {
    configured
        .iter()
        .filter(|attribute| match attribute {
            Attribute::Temperature => features.target_temperature,
            Attribute::TemperatureRange => features.target_temperature_range,
            Attribute::Humidity => features.target_humidity,
            Attribute::FanMode => !fan_modes.is_empty(),
            Attribute::SwingMode => !swing_modes.is_empty(),
            Attribute::HvacMode | Attribute::PresetMode | Attribute::Other(_) => true,
        })
        .cloned()
        .collect()
}
