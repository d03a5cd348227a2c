// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote-controlled climate entity.
//!
//! A [`ClimateEntity`] exposes the climate surface of an appliance that is
//! only reachable through learned remote codes. Every setter updates the
//! state optimistically, composes the matching code and hands it to the
//! [`Dispatcher`]. Nothing is read back from the appliance.
//!
//! # HVAC mode transitions
//!
//! | From | To | Codes sent |
//! |------|----|------------|
//! | `off` | `X` | `on`, power-on delay, composite for `X` |
//! | `X` | `off` | `off` |
//! | `X` | `Y` | composite for `Y` |
//!
//! A transition to the current mode re-sends its composite.
//!
//! # Examples
//!
//! ```no_run
//! use climate_remote_lib::ClimateEntity;
//! use climate_remote_lib::config::ClimateConfig;
//! use climate_remote_lib::protocol::HomeAssistantConfig;
//! use climate_remote_lib::types::HvacMode;
//!
//! # async fn example(config: ClimateConfig) -> climate_remote_lib::Result<()> {
//! let transmitter = HomeAssistantConfig::new("http://homeassistant.local:8123", "token")
//!     .into_transmitter()?;
//! let entity = ClimateEntity::new(config, transmitter);
//!
//! let mut states = entity.subscribe();
//! entity.set_hvac_mode(HvacMode::Cool).await?;
//! entity.set_fan_mode("high").await?;
//!
//! assert_eq!(states.borrow_and_update().hvac_mode(), HvacMode::Cool);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::capabilities::ClimateFeatures;
use crate::command::{RemoteCommand, command_for};
use crate::config::ClimateConfig;
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::error::ValueError;
use crate::protocol::{SendOptions, Transmitter};
use crate::sensor::parse_sensor_state;
use crate::state::{ClimateState, RestoreSnapshot};
use crate::types::{Attribute, Humidity, HvacMode, TemperatureUnit};

/// A target temperature request.
///
/// Mirrors the service call fields: either `temperature`, or both range
/// bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TemperatureRequest {
    /// Single target temperature.
    pub temperature: Option<f64>,
    /// Low bound of the target range.
    pub target_temp_low: Option<f64>,
    /// High bound of the target range.
    pub target_temp_high: Option<f64>,
}

impl TemperatureRequest {
    /// Requests a single target temperature.
    #[must_use]
    pub fn target(temperature: f64) -> Self {
        Self {
            temperature: Some(temperature),
            ..Self::default()
        }
    }

    /// Requests a target range.
    #[must_use]
    pub fn range(low: f64, high: f64) -> Self {
        Self {
            temperature: None,
            target_temp_low: Some(low),
            target_temp_high: Some(high),
        }
    }
}

/// Which sensor feeds a current reading.
#[derive(Debug, Clone, Copy)]
enum SensorKind {
    Temperature,
    Humidity,
}

impl SensorKind {
    fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Humidity => "humidity",
        }
    }
}

/// State shared with sensor tracking tasks.
#[derive(Debug)]
struct Shared {
    state: RwLock<ClimateState>,
    state_tx: watch::Sender<ClimateState>,
}

impl Shared {
    /// Mutates the state and notifies watchers.
    fn update<R>(&self, f: impl FnOnce(&mut ClimateState) -> R) -> R {
        let mut state = self.state.write();
        let result = f(&mut *state);
        self.state_tx.send_replace(state.clone());
        result
    }

    /// Applies a raw sensor state. Returns `true` if a reading was stored.
    fn apply_reading(&self, kind: SensorKind, raw: &str) -> bool {
        let reading = match parse_sensor_state(raw) {
            Ok(Some(reading)) => reading,
            Ok(None) => return false,
            Err(e) => {
                tracing::error!(error = %e, "Unable to update from {} sensor", kind.name());
                return false;
            }
        };
        match kind {
            SensorKind::Temperature => {
                self.update(|state| state.set_current_temperature(reading));
            }
            SensorKind::Humidity => match Humidity::from_reading(reading) {
                Ok(humidity) => self.update(|state| state.set_current_humidity(humidity)),
                Err(e) => {
                    tracing::error!(error = %e, "Unable to update from humidity sensor");
                    return false;
                }
            },
        }
        true
    }
}

/// Climate entity driving an appliance through a [`Transmitter`].
#[derive(Debug)]
pub struct ClimateEntity<T> {
    config: Arc<ClimateConfig>,
    shared: Arc<Shared>,
    dispatcher: Dispatcher<T>,
    power_on_delay: Duration,
}

impl<T: Transmitter> ClimateEntity<T> {
    /// Delay between the power-on code and the first mode code.
    pub const DEFAULT_POWER_ON_DELAY: Duration = Duration::from_secs(1);

    /// Creates an entity sending through `transmitter`.
    ///
    /// The initial state is derived from `config`, see
    /// [`ClimateState::from_config`].
    #[must_use]
    pub fn new(config: ClimateConfig, transmitter: T) -> Self {
        let dispatcher = Dispatcher::new(
            transmitter,
            config.device.as_str(),
            config.target.clone(),
            SendOptions::CLIMATE,
        );
        Self::with_dispatcher(config, dispatcher)
    }

    /// Creates an entity around an existing dispatcher.
    #[must_use]
    pub fn with_dispatcher(config: ClimateConfig, dispatcher: Dispatcher<T>) -> Self {
        let state = ClimateState::from_config(&config);
        let (state_tx, _) = watch::channel(state.clone());
        Self {
            config: Arc::new(config),
            shared: Arc::new(Shared {
                state: RwLock::new(state),
                state_tx,
            }),
            dispatcher,
            power_on_delay: Self::DEFAULT_POWER_ON_DELAY,
        }
    }

    /// Overrides the power-on delay.
    #[must_use]
    pub fn with_power_on_delay(mut self, delay: Duration) -> Self {
        self.power_on_delay = delay;
        self
    }

    // ========== Metadata ==========

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ClimateConfig {
        &self.config
    }

    /// Returns the dispatcher.
    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher<T> {
        &self.dispatcher
    }

    /// Returns a copy of the current state.
    #[must_use]
    pub fn state(&self) -> ClimateState {
        self.shared.state.read().clone()
    }

    /// Subscribes to state changes.
    ///
    /// The receiver holds the state after the latest mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ClimateState> {
        self.shared.state_tx.subscribe()
    }

    /// Returns the active capabilities.
    #[must_use]
    pub fn features(&self) -> ClimateFeatures {
        self.shared.state.read().features()
    }

    /// Returns the host's supported-features bitmask.
    #[must_use]
    pub fn supported_features(&self) -> u32 {
        self.features().bits()
    }

    /// Returns the configured HVAC modes, in order.
    #[must_use]
    pub fn hvac_modes(&self) -> Vec<HvacMode> {
        self.config.hvac_mode_list().collect()
    }

    /// Returns the configured fan modes.
    #[must_use]
    pub fn fan_modes(&self) -> &[String] {
        &self.config.fan_modes
    }

    /// Returns the configured swing states.
    ///
    /// Empty unless swing is stateful.
    #[must_use]
    pub fn swing_modes(&self) -> &[String] {
        self.config.swing.stateful_modes()
    }

    /// Returns the configured presets.
    #[must_use]
    pub fn preset_modes(&self) -> &[String] {
        &self.config.preset_modes
    }

    /// Returns the lowest settable temperature for the current mode.
    #[must_use]
    pub fn min_temp(&self) -> f64 {
        self.shared.state.read().min_temp()
    }

    /// Returns the highest settable temperature for the current mode.
    #[must_use]
    pub fn max_temp(&self) -> f64 {
        self.shared.state.read().max_temp()
    }

    /// Returns the target temperature step.
    #[must_use]
    pub fn target_temperature_step(&self) -> f64 {
        self.config.temperature_step
    }

    /// Returns the temperature unit.
    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.config.temperature_unit
    }

    // ========== Setters ==========

    /// Sets the target temperature or range.
    ///
    /// A single temperature wins over range bounds when both are given.
    /// Any direct temperature change resets the preset to `"none"` when that
    /// preset is configured.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::MissingTemperatureBound` if neither a temperature
    /// nor both bounds are given, `ValueError::NonFiniteTemperature` for a
    /// NaN or infinite value, or `ValueError::InvertedTemperatureRange` if
    /// the low bound is above the high one. Nothing is sent in these cases.
    pub async fn set_temperature(
        &self,
        request: TemperatureRequest,
    ) -> Result<DispatchOutcome, ValueError> {
        let preset_modes = &self.config.preset_modes;
        let command = if let Some(temperature) = request.temperature {
            if !temperature.is_finite() {
                return Err(ValueError::NonFiniteTemperature(temperature));
            }
            self.shared.update(|state| {
                state.set_target_temperature(temperature);
                let command = command_for(&Attribute::Temperature, state, &self.config);
                state.reset_preset(preset_modes);
                command
            })
        } else {
            let (Some(low), Some(high)) = (request.target_temp_low, request.target_temp_high)
            else {
                return Err(ValueError::MissingTemperatureBound);
            };
            if let Some(bound) = [low, high].into_iter().find(|t| !t.is_finite()) {
                return Err(ValueError::NonFiniteTemperature(bound));
            }
            if low > high {
                return Err(ValueError::InvertedTemperatureRange { low, high });
            }
            self.shared.update(|state| {
                state.set_target_temperature_range(low, high);
                let command = command_for(&Attribute::TemperatureRange, state, &self.config);
                state.reset_preset(preset_modes);
                command
            })
        };
        Ok(self.dispatcher.send(command).await)
    }

    /// Sets the target humidity in percent.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::OutOfRange` if `humidity` is above 100.
    pub async fn set_humidity(&self, humidity: u8) -> Result<DispatchOutcome, ValueError> {
        let humidity = Humidity::new(humidity)?;
        let command = self.shared.update(|state| {
            state.set_target_humidity(humidity);
            command_for(&Attribute::Humidity, state, &self.config)
        });
        Ok(self.dispatcher.send(command).await)
    }

    /// Switches the HVAC mode.
    ///
    /// Temperature capabilities are recomputed for the new mode and the
    /// preset is reset to `"none"` when that preset is configured. Leaving
    /// `off` sends the power-on code first and waits for the power-on
    /// delay.
    ///
    /// Returns the outcome of the last code sent.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnsupportedMode` if `mode` is not configured.
    pub async fn set_hvac_mode(&self, mode: HvacMode) -> Result<DispatchOutcome, ValueError> {
        if !self.config.supports_hvac_mode(mode) {
            return Err(ValueError::UnsupportedMode {
                kind: "hvac",
                value: mode.to_string(),
            });
        }

        let previous = self.shared.update(|state| {
            let previous = state.hvac_mode();
            state.set_hvac_mode(mode);
            state.reset_preset(&self.config.preset_modes);
            state.refresh_capabilities(&self.config);
            previous
        });
        tracing::debug!(from = %previous, to = %mode, "HVAC mode transition");

        if mode.is_off() {
            return Ok(self.dispatcher.send(RemoteCommand::off()).await);
        }
        if previous.is_off() {
            self.dispatcher.send_without_hint(RemoteCommand::on()).await;
            tokio::time::sleep(self.power_on_delay).await;
        }

        let command = command_for(&Attribute::HvacMode, &self.shared.state.read(), &self.config);
        Ok(self.dispatcher.send(command).await)
    }

    /// Sets the fan mode.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnsupportedMode` if `mode` is not configured.
    pub async fn set_fan_mode(&self, mode: &str) -> Result<DispatchOutcome, ValueError> {
        Self::check_mode("fan", mode, &self.config.fan_modes)?;
        let command = self.shared.update(|state| {
            state.set_fan_mode(mode);
            command_for(&Attribute::FanMode, state, &self.config)
        });
        Ok(self.dispatcher.send(command).await)
    }

    /// Sets the swing state.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnsupportedMode` if `mode` is not a configured
    /// swing state. Toggle-style swing keys are never states; they are
    /// exposed as [`SwingToggleButton`](crate::button::SwingToggleButton)s.
    pub async fn set_swing_mode(&self, mode: &str) -> Result<DispatchOutcome, ValueError> {
        Self::check_mode("swing", mode, self.config.swing.stateful_modes())?;
        let command = self.shared.update(|state| {
            state.set_swing_mode(mode);
            command_for(&Attribute::SwingMode, state, &self.config)
        });
        Ok(self.dispatcher.send(command).await)
    }

    /// Sets the preset.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::UnsupportedMode` if `mode` is not configured.
    pub async fn set_preset_mode(&self, mode: &str) -> Result<DispatchOutcome, ValueError> {
        Self::check_mode("preset", mode, &self.config.preset_modes)?;
        let command = self.shared.update(|state| {
            state.set_preset_mode(mode);
            command_for(&Attribute::PresetMode, state, &self.config)
        });
        Ok(self.dispatcher.send(command).await)
    }

    fn check_mode(kind: &'static str, mode: &str, configured: &[String]) -> Result<(), ValueError> {
        if configured.iter().any(|m| m == mode) {
            Ok(())
        } else {
            Err(ValueError::UnsupportedMode {
                kind,
                value: mode.to_string(),
            })
        }
    }

    // ========== Restore ==========

    /// Returns what the host should persist.
    #[must_use]
    pub fn snapshot(&self) -> RestoreSnapshot {
        RestoreSnapshot::from_state(&self.shared.state.read())
    }

    /// Restores the last persisted state.
    ///
    /// Attributes missing from the snapshot keep their current values; the
    /// extra payload, when present, replaces all target temperatures. A
    /// stored range that is inverted or not finite is discarded and seeded
    /// again. Capabilities are recomputed for the restored HVAC mode.
    /// Nothing is sent.
    pub fn restore(&self, snapshot: &RestoreSnapshot) {
        self.shared.update(|state| {
            if let Some(mode) = snapshot.hvac_mode {
                if self.config.supports_hvac_mode(mode) {
                    state.set_hvac_mode(mode);
                } else {
                    tracing::warn!(hvac_mode = %mode, "Ignoring restored HVAC mode that is not configured");
                }
            }
            if let Some(fan_mode) = &snapshot.fan_mode {
                state.set_fan_mode(fan_mode.as_str());
            }
            if let Some(swing_mode) = &snapshot.swing_mode {
                state.set_swing_mode(swing_mode.as_str());
            }
            if let Some(preset_mode) = &snapshot.preset_mode {
                state.set_preset_mode(preset_mode.as_str());
            }
            if let Some(extra) = snapshot.extra {
                state.restore_temperatures(
                    extra.temperature,
                    extra.target_temp_low,
                    extra.target_temp_high,
                );
            }
            state.refresh_capabilities(&self.config);
        });
    }

    // ========== Sensors ==========

    /// Applies a temperature sensor state.
    ///
    /// Placeholder states are ignored. An unparsable state is logged and
    /// the previous reading kept. Returns `true` if a reading was stored.
    pub fn update_current_temperature(&self, sensor_state: &str) -> bool {
        self.shared.apply_reading(SensorKind::Temperature, sensor_state)
    }

    /// Applies a humidity sensor state.
    ///
    /// The reading is truncated to a whole percentage. Returns `true` if a
    /// reading was stored.
    pub fn update_current_humidity(&self, sensor_state: &str) -> bool {
        self.shared.apply_reading(SensorKind::Humidity, sensor_state)
    }

    /// Follows a temperature sensor.
    ///
    /// The current value is applied at once, then every change until the
    /// sender is dropped. `None` means the sensor entity does not exist.
    pub fn track_current_temperature(
        &self,
        sensor: watch::Receiver<Option<String>>,
    ) -> JoinHandle<()> {
        self.track(SensorKind::Temperature, sensor)
    }

    /// Follows a humidity sensor, see
    /// [`track_current_temperature`](Self::track_current_temperature).
    pub fn track_current_humidity(
        &self,
        sensor: watch::Receiver<Option<String>>,
    ) -> JoinHandle<()> {
        self.track(SensorKind::Humidity, sensor)
    }

    fn track(
        &self,
        kind: SensorKind,
        mut sensor: watch::Receiver<Option<String>>,
    ) -> JoinHandle<()> {
        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move {
            loop {
                let current = sensor.borrow_and_update().clone();
                if let Some(raw) = current {
                    shared.apply_reading(kind, &raw);
                }
                if sensor.changed().await.is_err() {
                    tracing::debug!(sensor = kind.name(), "Sensor tracking stopped");
                    break;
                }
            }
        })
    }
}
