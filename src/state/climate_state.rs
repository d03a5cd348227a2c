// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate entity state.

use crate::capabilities::{ClimateFeatures, resolve_temperature_conf};
use crate::config::ClimateConfig;
use crate::types::{Humidity, HvacMode, PRESET_NONE, TemperatureConf, TemperatureMode};

/// Attribute snapshot of a remote-controlled climate entity.
///
/// This is the single mutable bag the command composer reads. There is no
/// feedback from the appliance: values reflect what was last requested.
///
/// # Examples
///
/// ```
/// use climate_remote_lib::state::ClimateState;
/// use climate_remote_lib::types::{HvacMode, TemperatureConf};
///
/// let mut state = ClimateState::new(HvacMode::Heat);
/// state.apply_temperature_conf(&TemperatureConf::target(18.0, 28.0));
///
/// assert!(state.features().target_temperature);
/// assert_eq!(state.target_temperature(), Some(18.0));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClimateState {
    hvac_mode: HvacMode,
    fan_mode: Option<String>,
    swing_mode: Option<String>,
    preset_mode: Option<String>,
    target_temperature: Option<f64>,
    target_temperature_low: Option<f64>,
    target_temperature_high: Option<f64>,
    target_humidity: Option<Humidity>,
    current_temperature: Option<f64>,
    current_humidity: Option<Humidity>,
    min_temp: f64,
    max_temp: f64,
    features: ClimateFeatures,
}

impl ClimateState {
    /// Creates an empty state in the given mode.
    #[must_use]
    pub fn new(hvac_mode: HvacMode) -> Self {
        Self {
            hvac_mode,
            fan_mode: None,
            swing_mode: None,
            preset_mode: None,
            target_temperature: None,
            target_temperature_low: None,
            target_temperature_high: None,
            target_humidity: None,
            current_temperature: None,
            current_humidity: None,
            min_temp: TemperatureConf::DEFAULT_MIN,
            max_temp: TemperatureConf::DEFAULT_MAX,
            features: ClimateFeatures::default(),
        }
    }

    /// Creates the initial state for a configuration.
    ///
    /// Every mode list starts at its first value. Temperature bounds are
    /// seeded from the base configuration, then capabilities are resolved
    /// for the initial HVAC mode. With target humidity enabled, the target
    /// starts at [`Humidity::DEFAULT_TARGET`].
    #[must_use]
    pub fn from_config(config: &ClimateConfig) -> Self {
        let mut state = Self::new(config.initial_hvac_mode());
        state.features = ClimateFeatures::from_config(config);
        state.fan_mode = config.fan_modes.first().cloned();
        state.swing_mode = config.swing.stateful_modes().first().cloned();
        if config.humidity {
            state.target_humidity = Some(Humidity::DEFAULT_TARGET);
        }
        state.apply_temperature_conf(&config.temperature);
        state.refresh_capabilities(config);
        state
    }

    // ========== Capabilities ==========

    /// Returns the active capabilities.
    #[must_use]
    pub fn features(&self) -> ClimateFeatures {
        self.features
    }

    /// Updates temperature capabilities from a resolved configuration.
    ///
    /// Bounds become active at the configured minimum the first time they
    /// appear; values already set are never overwritten.
    pub fn apply_temperature_conf(&mut self, conf: &TemperatureConf) {
        match conf.mode {
            TemperatureMode::None => {
                self.features.target_temperature = false;
                self.features.target_temperature_range = false;
            }
            TemperatureMode::Target => {
                self.min_temp = conf.min;
                self.max_temp = conf.max;
                self.features.target_temperature = true;
                self.features.target_temperature_range = false;
                self.target_temperature.get_or_insert(conf.min);
            }
            TemperatureMode::Range => {
                self.min_temp = conf.min;
                self.max_temp = conf.max;
                self.features.target_temperature = false;
                self.features.target_temperature_range = true;
                self.target_temperature_low.get_or_insert(conf.min);
                self.target_temperature_high.get_or_insert(conf.min);
            }
        }
    }

    /// Resolves the temperature configuration for the current HVAC mode and
    /// applies it.
    pub fn refresh_capabilities(&mut self, config: &ClimateConfig) {
        let conf = *resolve_temperature_conf(self.hvac_mode, &config.hvac_modes, &config.temperature);
        self.apply_temperature_conf(&conf);
    }

    // ========== Modes ==========

    /// Returns the HVAC mode.
    #[must_use]
    pub fn hvac_mode(&self) -> HvacMode {
        self.hvac_mode
    }

    /// Sets the HVAC mode. Capabilities are not recomputed.
    pub fn set_hvac_mode(&mut self, mode: HvacMode) {
        self.hvac_mode = mode;
    }

    /// Returns the fan mode.
    #[must_use]
    pub fn fan_mode(&self) -> Option<&str> {
        self.fan_mode.as_deref()
    }

    /// Sets the fan mode.
    pub fn set_fan_mode(&mut self, mode: impl Into<String>) {
        self.fan_mode = Some(mode.into());
    }

    /// Returns the swing state.
    #[must_use]
    pub fn swing_mode(&self) -> Option<&str> {
        self.swing_mode.as_deref()
    }

    /// Sets the swing state.
    pub fn set_swing_mode(&mut self, mode: impl Into<String>) {
        self.swing_mode = Some(mode.into());
    }

    /// Returns the preset.
    #[must_use]
    pub fn preset_mode(&self) -> Option<&str> {
        self.preset_mode.as_deref()
    }

    /// Sets the preset.
    pub fn set_preset_mode(&mut self, mode: impl Into<String>) {
        self.preset_mode = Some(mode.into());
    }

    /// Resets the preset to `"none"` if that preset is configured.
    ///
    /// Returns `true` if the preset was changed.
    pub fn reset_preset(&mut self, preset_modes: &[String]) -> bool {
        if !preset_modes.iter().any(|mode| mode == PRESET_NONE) {
            return false;
        }
        let changed = self.preset_mode.as_deref() != Some(PRESET_NONE);
        self.preset_mode = Some(PRESET_NONE.to_string());
        changed
    }

    // ========== Temperature ==========

    /// Returns the target temperature.
    #[must_use]
    pub fn target_temperature(&self) -> Option<f64> {
        self.target_temperature
    }

    /// Sets the target temperature.
    pub fn set_target_temperature(&mut self, value: f64) {
        self.target_temperature = Some(value);
    }

    /// Returns the low bound of the target range.
    #[must_use]
    pub fn target_temperature_low(&self) -> Option<f64> {
        self.target_temperature_low
    }

    /// Returns the high bound of the target range.
    #[must_use]
    pub fn target_temperature_high(&self) -> Option<f64> {
        self.target_temperature_high
    }

    /// Sets both bounds of the target range.
    ///
    /// Callers are expected to have checked `low <= high`.
    pub fn set_target_temperature_range(&mut self, low: f64, high: f64) {
        self.target_temperature_low = Some(low);
        self.target_temperature_high = Some(high);
    }

    /// Restores stored temperatures, including unset ones.
    ///
    /// Non-finite values are dropped. The range is kept only as a pair of
    /// finite bounds with `low <= high`; anything else clears both so they
    /// are seeded again.
    pub(crate) fn restore_temperatures(
        &mut self,
        target: Option<f64>,
        low: Option<f64>,
        high: Option<f64>,
    ) {
        let (low, high) = match (low, high) {
            (Some(low), Some(high)) if low.is_finite() && high.is_finite() && low <= high => {
                (Some(low), Some(high))
            }
            (None, None) => (None, None),
            (low, high) => {
                tracing::warn!(?low, ?high, "Dropping invalid restored temperature range");
                (None, None)
            }
        };
        self.target_temperature = target.filter(|t| t.is_finite());
        self.target_temperature_low = low;
        self.target_temperature_high = high;
    }

    /// Returns the lowest settable temperature.
    #[must_use]
    pub fn min_temp(&self) -> f64 {
        self.min_temp
    }

    /// Returns the highest settable temperature.
    #[must_use]
    pub fn max_temp(&self) -> f64 {
        self.max_temp
    }

    // ========== Humidity ==========

    /// Returns the target humidity.
    #[must_use]
    pub fn target_humidity(&self) -> Option<Humidity> {
        self.target_humidity
    }

    /// Sets the target humidity.
    pub fn set_target_humidity(&mut self, value: Humidity) {
        self.target_humidity = Some(value);
    }

    // ========== Sensors ==========

    /// Returns the measured temperature.
    #[must_use]
    pub fn current_temperature(&self) -> Option<f64> {
        self.current_temperature
    }

    /// Sets the measured temperature.
    pub fn set_current_temperature(&mut self, value: f64) {
        self.current_temperature = Some(value);
    }

    /// Returns the measured humidity.
    #[must_use]
    pub fn current_humidity(&self) -> Option<Humidity> {
        self.current_humidity
    }

    /// Sets the measured humidity.
    pub fn set_current_humidity(&mut self, value: Humidity) {
        self.current_humidity = Some(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HvacModeConf, Target};
    use crate::types::SwingMode;

    fn config() -> ClimateConfig {
        ClimateConfig::builder("test", Target::entity("remote.test_entity"))
            .temperature(TemperatureConf::target(18.0, 28.0))
            .hvac_modes([HvacMode::Off, HvacMode::Heat, HvacMode::Cool])
            .fan_modes(["low", "medium", "high"])
            .preset_modes(["none", "boost"])
            .swing(SwingMode::Stateful, ["vertical", "horizontal"])
            .build()
            .unwrap()
    }

    #[test]
    fn initial_state_uses_first_values() {
        let state = ClimateState::from_config(&config());
        assert_eq!(state.hvac_mode(), HvacMode::Off);
        assert_eq!(state.fan_mode(), Some("low"));
        assert_eq!(state.swing_mode(), Some("vertical"));
        assert_eq!(state.preset_mode(), None);
        assert!(state.features().fan_mode);
        assert!(state.features().preset_mode);
        assert!(state.features().swing_mode);
    }

    #[test]
    fn initial_state_resolves_mode_override() {
        let state = ClimateState::from_config(&config());
        // `off` carries a "none" override
        assert!(!state.features().target_temperature);
        // seeded from the base configuration before the override applied
        assert_eq!(state.target_temperature(), Some(18.0));
    }

    #[test]
    fn toggle_swing_is_not_a_state() {
        let config = ClimateConfig::builder("test", Target::entity("remote.ir"))
            .hvac_modes([HvacMode::Cool])
            .swing(SwingMode::Toggle, ["vertical"])
            .build()
            .unwrap();
        let state = ClimateState::from_config(&config);
        assert_eq!(state.swing_mode(), None);
        assert!(!state.features().swing_mode);
    }

    #[test]
    fn none_clears_both_temperature_flags() {
        let mut state = ClimateState::new(HvacMode::Heat);
        state.apply_temperature_conf(&TemperatureConf::range(18.0, 28.0));
        assert!(state.features().target_temperature_range);
        state.apply_temperature_conf(&TemperatureConf::none());
        assert!(!state.features().target_temperature);
        assert!(!state.features().target_temperature_range);
    }

    #[test]
    fn seeding_never_overwrites() {
        let mut state = ClimateState::new(HvacMode::Heat);
        state.set_target_temperature(24.0);
        state.apply_temperature_conf(&TemperatureConf::target(11.0, 21.0));
        assert_eq!(state.target_temperature(), Some(24.0));
        assert_eq!(state.min_temp(), 11.0);
        assert_eq!(state.max_temp(), 21.0);
    }

    #[test]
    fn range_seeds_both_bounds_at_min() {
        let mut state = ClimateState::new(HvacMode::HeatCool);
        state.apply_temperature_conf(&TemperatureConf::range(17.0, 27.0));
        assert_eq!(state.target_temperature_low(), Some(17.0));
        assert_eq!(state.target_temperature_high(), Some(17.0));
        assert!(!state.features().target_temperature);
    }

    #[test]
    fn refresh_follows_hvac_mode() {
        let config = ClimateConfig::builder("test", Target::entity("remote.ir"))
            .temperature(TemperatureConf::target(18.0, 28.0))
            .hvac_modes([HvacMode::Off, HvacMode::Heat])
            .hvac_mode(
                HvacMode::Heat,
                HvacModeConf::with_temperature(TemperatureConf::range(11.0, 21.0)),
            )
            .build()
            .unwrap();
        let mut state = ClimateState::from_config(&config);
        state.set_hvac_mode(HvacMode::Heat);
        state.refresh_capabilities(&config);
        assert!(state.features().target_temperature_range);
        assert!(!state.features().target_temperature);
        assert_eq!(state.min_temp(), 11.0);
    }

    #[test]
    fn reset_preset_requires_none_preset() {
        let mut state = ClimateState::new(HvacMode::Heat);
        state.set_preset_mode("boost");
        assert!(!state.reset_preset(&["boost".to_string()]));
        assert_eq!(state.preset_mode(), Some("boost"));

        assert!(state.reset_preset(&["none".to_string(), "boost".to_string()]));
        assert_eq!(state.preset_mode(), Some("none"));
    }

    #[test]
    fn reset_preset_without_presets_leaves_unset() {
        let mut state = ClimateState::new(HvacMode::Heat);
        assert!(!state.reset_preset(&[]));
        assert_eq!(state.preset_mode(), None);
    }

    #[test]
    fn restore_drops_invalid_range() {
        let config = ClimateConfig::builder("test", Target::entity("remote.test_entity"))
            .temperature(TemperatureConf::range(18.0, 26.0))
            .hvac_modes([HvacMode::HeatCool])
            .build()
            .unwrap();
        let mut state = ClimateState::from_config(&config);

        state.restore_temperatures(None, Some(25.0), Some(20.0));
        assert_eq!(state.target_temperature_low(), None);
        state.refresh_capabilities(&config);
        assert_eq!(state.target_temperature_low(), Some(18.0));
        assert_eq!(state.target_temperature_high(), Some(18.0));

        state.restore_temperatures(Some(f64::NAN), Some(f64::NAN), Some(22.0));
        assert_eq!(state.target_temperature(), None);
        assert_eq!(state.target_temperature_high(), None);

        state.restore_temperatures(Some(21.0), Some(19.0), Some(23.0));
        assert_eq!(state.target_temperature(), Some(21.0));
        assert_eq!(state.target_temperature_low(), Some(19.0));
        assert_eq!(state.target_temperature_high(), Some(23.0));
    }

    #[test]
    fn humidity_target_is_seeded_only_when_enabled() {
        assert_eq!(ClimateState::from_config(&config()).target_humidity(), None);

        let mut config = config();
        config.humidity = true;
        let state = ClimateState::from_config(&config);
        assert!(state.features().target_humidity);
        assert_eq!(state.target_humidity(), Some(Humidity::DEFAULT_TARGET));
    }
}
