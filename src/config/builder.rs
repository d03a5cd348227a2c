// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Builder for [`ClimateConfig`].

use indexmap::IndexMap;

use super::{ClimateConfig, GroupingDispatch, HvacModeConf, SwingConf, Target};
use crate::error::ConfigError;
use crate::types::{Attribute, HvacMode, SwingMode, TemperatureConf, TemperatureUnit};

/// Builder for creating climate configurations in code.
///
/// # Examples
///
/// ```
/// use climate_remote_lib::config::{ClimateConfig, Target};
/// use climate_remote_lib::types::{Attribute, HvacMode, TemperatureConf};
///
/// let config = ClimateConfig::builder("bedroom_ac", Target::entity("remote.ir"))
///     .temperature(TemperatureConf::target(16.0, 30.0))
///     .hvac_modes([HvacMode::Off, HvacMode::Cool, HvacMode::Dry])
///     .fan_modes(["auto", "low", "high"])
///     .grouping_attributes([Attribute::HvacMode, Attribute::Temperature])
///     .build()
///     .unwrap();
///
/// // Modes without temperature control get an override automatically
/// assert!(config.hvac_modes[&HvacMode::Dry].temperature.is_some());
/// assert!(config.hvac_modes[&HvacMode::Cool].temperature.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct ClimateConfigBuilder {
    inner: ClimateConfig,
}

impl ClimateConfigBuilder {
    /// Creates a builder for the given transmitter device and target.
    #[must_use]
    pub fn new(device: impl Into<String>, target: Target) -> Self {
        Self {
            inner: ClimateConfig {
                device: device.into(),
                target,
                temperature: TemperatureConf::none(),
                temperature_unit: TemperatureUnit::default(),
                temperature_step: ClimateConfig::DEFAULT_STEP,
                hvac_modes: IndexMap::new(),
                fan_modes: Vec::new(),
                preset_modes: Vec::new(),
                swing: SwingConf::default(),
                humidity: false,
                grouping_attributes: Vec::new(),
                grouping_dispatch: GroupingDispatch::default(),
                current_temperature_sensor_entity_id: None,
                current_humidity_sensor_entity_id: None,
            },
        }
    }

    /// Sets the base temperature capability.
    #[must_use]
    pub fn temperature(mut self, temperature: TemperatureConf) -> Self {
        self.inner.temperature = temperature;
        self
    }

    /// Sets the temperature unit.
    #[must_use]
    pub fn temperature_unit(mut self, unit: TemperatureUnit) -> Self {
        self.inner.temperature_unit = unit;
        self
    }

    /// Sets the target temperature step.
    #[must_use]
    pub fn temperature_step(mut self, step: f64) -> Self {
        self.inner.temperature_step = step;
        self
    }

    /// Sets the HVAC modes, in order.
    ///
    /// `off`, `fan_only` and `dry` get a "no temperature control" override,
    /// the other modes inherit the base configuration.
    #[must_use]
    pub fn hvac_modes(mut self, modes: impl IntoIterator<Item = HvacMode>) -> Self {
        self.inner.hvac_modes = modes
            .into_iter()
            .map(|mode| {
                let conf = match mode {
                    HvacMode::Off | HvacMode::FanOnly | HvacMode::Dry => {
                        HvacModeConf::with_temperature(TemperatureConf::none())
                    }
                    _ => HvacModeConf::inherit(),
                };
                (mode, conf)
            })
            .collect();
        self
    }

    /// Adds or replaces one HVAC mode with an explicit override.
    #[must_use]
    pub fn hvac_mode(mut self, mode: HvacMode, conf: HvacModeConf) -> Self {
        self.inner.hvac_modes.insert(mode, conf);
        self
    }

    /// Sets the fan modes.
    #[must_use]
    pub fn fan_modes<S: Into<String>>(mut self, modes: impl IntoIterator<Item = S>) -> Self {
        self.inner.fan_modes = modes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the preset modes.
    #[must_use]
    pub fn preset_modes<S: Into<String>>(mut self, modes: impl IntoIterator<Item = S>) -> Self {
        self.inner.preset_modes = modes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the swing control style and its modes.
    #[must_use]
    pub fn swing<S: Into<String>>(
        mut self,
        mode: SwingMode,
        modes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.inner.swing = SwingConf {
            mode,
            modes: modes.into_iter().map(Into::into).collect(),
        };
        self
    }

    /// Enables target humidity control.
    #[must_use]
    pub fn with_humidity(mut self) -> Self {
        self.inner.humidity = true;
        self
    }

    /// Sets the grouping attributes, in code order.
    #[must_use]
    pub fn grouping_attributes(mut self, attributes: impl IntoIterator<Item = Attribute>) -> Self {
        self.inner.grouping_attributes = attributes.into_iter().collect();
        self
    }

    /// Sends grouped attributes as a sequence of codes.
    #[must_use]
    pub fn grouping_as_sequence(mut self) -> Self {
        self.inner.grouping_dispatch = GroupingDispatch::Sequence;
        self
    }

    /// Sets the current temperature sensor.
    #[must_use]
    pub fn temperature_sensor(mut self, entity_id: impl Into<String>) -> Self {
        self.inner.current_temperature_sensor_entity_id = Some(entity_id.into());
        self
    }

    /// Sets the current humidity sensor.
    #[must_use]
    pub fn humidity_sensor(mut self, entity_id: impl Into<String>) -> Self {
        self.inner.current_humidity_sensor_entity_id = Some(entity_id.into());
        self
    }

    /// Validates and returns the configuration.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint, see [`ClimateConfig::validate`].
    pub fn build(self) -> Result<ClimateConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
