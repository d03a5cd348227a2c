// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Per-installation climate configuration.
//!
//! A [`ClimateConfig`] is the immutable record produced by the setup wizard
//! of the hosting runtime. It is decoded from JSON with serde, or assembled
//! in code with [`ClimateConfigBuilder`].
//!
//! # Examples
//!
//! ```
//! use climate_remote_lib::config::ClimateConfig;
//! use climate_remote_lib::types::HvacMode;
//!
//! let config: ClimateConfig = serde_json::from_value(serde_json::json!({
//!     "device": "living_room_ac",
//!     "target": { "entity_id": ["remote.broadlink"] },
//!     "temperature": { "mode": "target", "min": 18, "max": 28 },
//!     "hvac_modes": { "off": {}, "heat": {}, "cool": {} },
//!     "fan_modes": ["low", "medium", "high"],
//!     "grouping_attributes": ["hvac_mode", "fan_mode", "temperature"]
//! }))
//! .unwrap();
//!
//! config.validate().unwrap();
//! assert_eq!(config.initial_hvac_mode(), HvacMode::Off);
//! ```

mod builder;

pub use builder::ClimateConfigBuilder;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Attribute, HvacMode, SwingMode, TemperatureConf, TemperatureUnit};

/// Receivers a send-code request is addressed to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Remote entity identifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entity_id: Vec<String>,
    /// Device identifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub device_id: Vec<String>,
    /// Area identifiers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub area_id: Vec<String>,
}

impl Target {
    /// Targets a single remote entity.
    #[must_use]
    pub fn entity(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: vec![entity_id.into()],
            ..Self::default()
        }
    }

    /// Returns `true` if nothing is targeted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entity_id.is_empty() && self.device_id.is_empty() && self.area_id.is_empty()
    }
}

/// Per-HVAC-mode overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HvacModeConf {
    /// Replaces the base temperature configuration while this mode is active.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<TemperatureConf>,
}

impl HvacModeConf {
    /// A mode without overrides.
    #[must_use]
    pub const fn inherit() -> Self {
        Self { temperature: None }
    }

    /// A mode with its own temperature configuration.
    #[must_use]
    pub const fn with_temperature(temperature: TemperatureConf) -> Self {
        Self {
            temperature: Some(temperature),
        }
    }
}

/// Swing control configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwingConf {
    /// Control style.
    #[serde(default)]
    pub mode: SwingMode,
    /// Swing states (stateful) or toggle keys (toggle).
    #[serde(default)]
    pub modes: Vec<String>,
}

impl SwingConf {
    /// Swing modes usable as a climate attribute.
    ///
    /// Empty unless the control style is [`SwingMode::Stateful`]; toggle keys
    /// are exposed as buttons instead.
    #[must_use]
    pub fn stateful_modes(&self) -> &[String] {
        match self.mode {
            SwingMode::Stateful => &self.modes,
            SwingMode::None | SwingMode::Toggle => &[],
        }
    }
}

/// How a group of attribute codes is sent.
///
/// Stored as the boolean `grouping_attributes_as_sequence` in records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "bool", into = "bool")]
pub enum GroupingDispatch {
    /// All tokens joined with `_` into one code.
    #[default]
    Joined,
    /// Each token sent as its own code, in order.
    Sequence,
}

impl From<bool> for GroupingDispatch {
    fn from(as_sequence: bool) -> Self {
        if as_sequence {
            Self::Sequence
        } else {
            Self::Joined
        }
    }
}

impl From<GroupingDispatch> for bool {
    fn from(dispatch: GroupingDispatch) -> Self {
        matches!(dispatch, GroupingDispatch::Sequence)
    }
}

/// Immutable configuration of one remote-controlled climate appliance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateConfig {
    /// Device identifier understood by the transmitter.
    pub device: String,
    /// Receivers the codes are addressed to.
    pub target: Target,
    /// Base temperature capability.
    #[serde(default)]
    pub temperature: TemperatureConf,
    /// Unit of all temperatures.
    #[serde(default)]
    pub temperature_unit: TemperatureUnit,
    /// Target temperature step.
    #[serde(default = "ClimateConfig::default_step")]
    pub temperature_step: f64,
    /// Supported HVAC modes in configuration order, with overrides.
    pub hvac_modes: IndexMap<HvacMode, HvacModeConf>,
    /// Fan modes; the first one is the initial mode.
    #[serde(default)]
    pub fan_modes: Vec<String>,
    /// Preset modes.
    #[serde(default)]
    pub preset_modes: Vec<String>,
    /// Swing control.
    #[serde(default)]
    pub swing: SwingConf,
    /// Whether the appliance accepts a target humidity.
    #[serde(default)]
    pub humidity: bool,
    /// Attributes combined into one composite code, in code order.
    #[serde(default)]
    pub grouping_attributes: Vec<Attribute>,
    /// Whether a composite is sent joined or as a sequence.
    #[serde(default, rename = "grouping_attributes_as_sequence")]
    pub grouping_dispatch: GroupingDispatch,
    /// Sensor providing the current temperature.
    #[serde(default)]
    pub current_temperature_sensor_entity_id: Option<String>,
    /// Sensor providing the current humidity.
    #[serde(default)]
    pub current_humidity_sensor_entity_id: Option<String>,
}

impl ClimateConfig {
    /// Default target temperature step.
    pub const DEFAULT_STEP: f64 = 1.0;

    /// Largest accepted temperature step.
    pub const MAX_STEP: f64 = 10.0;

    const fn default_step() -> f64 {
        Self::DEFAULT_STEP
    }

    /// Creates a builder.
    #[must_use]
    pub fn builder(device: impl Into<String>, target: Target) -> ClimateConfigBuilder {
        ClimateConfigBuilder::new(device, target)
    }

    /// Decodes a configuration record.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Json` if the record does not match, or the
    /// first validation failure.
    pub fn from_value(record: serde_json::Value) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_value(record)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the setup wizard enforces.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device.trim().is_empty() {
            return Err(ConfigError::MissingDevice);
        }
        if self.target.is_empty() {
            return Err(ConfigError::EmptyTarget);
        }
        if self.hvac_modes.is_empty() {
            return Err(ConfigError::EmptyHvacModes);
        }
        if !(self.temperature_step > 0.0 && self.temperature_step <= Self::MAX_STEP) {
            return Err(ConfigError::InvalidTemperatureStep(self.temperature_step));
        }
        self.temperature.validate()?;
        for conf in self.hvac_modes.values() {
            if let Some(temperature) = &conf.temperature {
                temperature.validate()?;
            }
        }
        Ok(())
    }

    /// HVAC modes in configuration order.
    pub fn hvac_mode_list(&self) -> impl Iterator<Item = HvacMode> + '_ {
        self.hvac_modes.keys().copied()
    }

    /// The mode an entity starts in: the first configured one.
    ///
    /// Falls back to [`HvacMode::Off`] for an unvalidated, empty table.
    #[must_use]
    pub fn initial_hvac_mode(&self) -> HvacMode {
        self.hvac_modes
            .keys()
            .next()
            .copied()
            .unwrap_or(HvacMode::Off)
    }

    /// Returns `true` if `mode` is configured.
    #[must_use]
    pub fn supports_hvac_mode(&self, mode: HvacMode) -> bool {
        self.hvac_modes.contains_key(&mode)
    }
}
