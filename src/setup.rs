// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Entity setup from a configuration record.
//!
//! The host hands over the options record written by its setup wizard. An
//! absent or empty record means the wizard has not been completed yet: no
//! entity is created and this is not an error.
//!
//! # Examples
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use climate_remote_lib::protocol::HomeAssistantConfig;
//! use climate_remote_lib::setup;
//!
//! # async fn example(record: serde_json::Value) -> climate_remote_lib::Result<()> {
//! let transmitter = Arc::new(
//!     HomeAssistantConfig::new("http://homeassistant.local:8123", "token").into_transmitter()?,
//! );
//!
//! let climate = setup::setup_climate(Some(&record), Arc::clone(&transmitter))?;
//! let buttons = setup::setup_buttons(Some(&record), transmitter)?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::button::SwingToggleButton;
use crate::climate::ClimateEntity;
use crate::config::{ClimateConfig, SwingConf, Target};
use crate::dispatch::Dispatcher;
use crate::error::ConfigError;
use crate::protocol::{SendOptions, Transmitter};
use crate::types::SwingMode;

/// The subset of the record buttons need.
#[derive(Debug, Deserialize)]
struct ButtonOptions {
    device: String,
    target: Target,
    #[serde(default)]
    swing: SwingConf,
}

fn is_unconfigured(record: Option<&Value>) -> bool {
    match record {
        None | Some(Value::Null) => true,
        Some(Value::Object(options)) => options.is_empty(),
        Some(_) => false,
    }
}

fn skip() {
    tracing::debug!("Climate remote control platform is not configured, skip.");
}

/// Decodes and validates the options record.
///
/// Returns `Ok(None)` if the record is absent, `null` or `{}`.
///
/// # Errors
///
/// Returns `ConfigError` if the record does not decode or fails
/// validation.
pub fn load_options(record: Option<&Value>) -> Result<Option<ClimateConfig>, ConfigError> {
    match record {
        Some(options) if !is_unconfigured(record) => {
            ClimateConfig::from_value(options.clone()).map(Some)
        }
        _ => {
            skip();
            Ok(None)
        }
    }
}

/// Creates the climate entity for a record.
///
/// # Errors
///
/// See [`load_options`].
pub fn setup_climate<T: Transmitter>(
    record: Option<&Value>,
    transmitter: Arc<T>,
) -> Result<Option<ClimateEntity<T>>, ConfigError> {
    let Some(config) = load_options(record)? else {
        return Ok(None);
    };
    let dispatcher = Dispatcher::shared(
        transmitter,
        config.device.as_str(),
        config.target.clone(),
        SendOptions::CLIMATE,
    );
    Ok(Some(ClimateEntity::with_dispatcher(config, dispatcher)))
}

/// Creates one swing toggle button per key for a record.
///
/// Only toggle-style swing produces buttons; any other record yields none.
///
/// # Errors
///
/// Returns `ConfigError` if the record lacks a device or target.
pub fn setup_buttons<T: Transmitter>(
    record: Option<&Value>,
    transmitter: Arc<T>,
) -> Result<Vec<SwingToggleButton<T>>, ConfigError> {
    let Some(options) = record.filter(|_| !is_unconfigured(record)) else {
        skip();
        return Ok(Vec::new());
    };
    let options = ButtonOptions::deserialize(options)?;
    if options.device.trim().is_empty() {
        return Err(ConfigError::MissingDevice);
    }
    if options.target.is_empty() {
        return Err(ConfigError::EmptyTarget);
    }
    if options.swing.mode != SwingMode::Toggle {
        return Ok(Vec::new());
    }

    let dispatcher = Dispatcher::shared(
        transmitter,
        options.device,
        options.target,
        SendOptions::BUTTON,
    );
    Ok(options
        .swing
        .modes
        .into_iter()
        .map(|mode| SwingToggleButton::new(mode, dispatcher.clone()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransmitError;
    use crate::protocol::SendRequest;
    use crate::types::HvacMode;

    #[derive(Debug)]
    struct Noop;

    impl Transmitter for Noop {
        async fn send_command(&self, _: &SendRequest) -> Result<(), TransmitError> {
            Ok(())
        }
    }

    fn record() -> Value {
        serde_json::json!({
            "device": "test",
            "target": { "entity_id": ["remote.test_entity"] },
            "temperature": { "mode": "target", "min": 18, "max": 28 },
            "swing": { "mode": "toggle", "modes": ["vertical", "horizontal"] },
            "hvac_modes": { "off": {}, "cool": {} }
        })
    }

    #[test]
    fn empty_record_is_skipped() {
        assert!(load_options(None).unwrap().is_none());
        assert!(load_options(Some(&Value::Null)).unwrap().is_none());
        assert!(load_options(Some(&serde_json::json!({}))).unwrap().is_none());
        assert!(
            setup_buttons(Some(&serde_json::json!({})), Arc::new(Noop))
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn climate_from_record() {
        let record = record();
        let entity = setup_climate(Some(&record), Arc::new(Noop)).unwrap().unwrap();
        assert_eq!(entity.hvac_modes(), vec![HvacMode::Off, HvacMode::Cool]);
        assert!(entity.swing_modes().is_empty());
    }

    #[test]
    fn invalid_record_is_an_error() {
        let mut record = record();
        record["hvac_modes"] = serde_json::json!({});
        assert!(matches!(
            load_options(Some(&record)),
            Err(ConfigError::EmptyHvacModes)
        ));
    }

    #[test]
    fn toggle_swing_creates_buttons() {
        let buttons = setup_buttons(Some(&record()), Arc::new(Noop)).unwrap();
        let names: Vec<String> = buttons.iter().map(SwingToggleButton::name).collect();
        assert_eq!(names, vec!["swing vertical", "swing horizontal"]);
    }

    #[test]
    fn buttons_need_only_device_target_and_swing() {
        let record = serde_json::json!({
            "device": "test",
            "target": { "entity_id": ["remote.test_entity"] },
            "swing": { "mode": "toggle", "modes": ["vertical"] }
        });
        assert_eq!(setup_buttons(Some(&record), Arc::new(Noop)).unwrap().len(), 1);
    }

    #[test]
    fn stateful_swing_creates_no_buttons() {
        let mut record = record();
        record["swing"]["mode"] = serde_json::json!("state");
        assert!(setup_buttons(Some(&record), Arc::new(Noop)).unwrap().is_empty());
    }
}
