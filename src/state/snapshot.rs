// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted state for restoring an entity across restarts.
//!
//! The host stores two records: the base restorable state (HVAC mode plus
//! mode attributes) and an extra payload carrying the target temperatures.
//! Capabilities are never part of either; they depend on the HVAC mode and
//! are recomputed after restoring.
//!
//! # Examples
//!
//! ```
//! use climate_remote_lib::state::RestoreSnapshot;
//! use climate_remote_lib::types::HvacMode;
//!
//! let snapshot: RestoreSnapshot = serde_json::from_value(serde_json::json!({
//!     "hvac_mode": "cool",
//!     "fan_mode": "high",
//!     "extra": { "temperature": 22.5, "target_temp_low": null, "target_temp_high": null }
//! }))
//! .unwrap();
//!
//! assert_eq!(snapshot.hvac_mode, Some(HvacMode::Cool));
//! assert_eq!(snapshot.extra.unwrap().temperature, Some(22.5));
//! ```

use serde::{Deserialize, Serialize};

use super::ClimateState;
use crate::types::HvacMode;

/// Target temperatures stored alongside the restorable state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtraStoredData {
    /// Single target temperature.
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Low bound of the target range.
    #[serde(default)]
    pub target_temp_low: Option<f64>,
    /// High bound of the target range.
    #[serde(default)]
    pub target_temp_high: Option<f64>,
}

impl ExtraStoredData {
    /// Captures the target temperatures of a state.
    #[must_use]
    pub fn from_state(state: &ClimateState) -> Self {
        Self {
            temperature: state.target_temperature(),
            target_temp_low: state.target_temperature_low(),
            target_temp_high: state.target_temperature_high(),
        }
    }
}

/// Last persisted state of a climate entity.
///
/// Every field is optional: a missing attribute keeps the value the entity
/// was created with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RestoreSnapshot {
    /// Last HVAC mode.
    #[serde(default)]
    pub hvac_mode: Option<HvacMode>,
    /// Last fan mode.
    #[serde(default)]
    pub fan_mode: Option<String>,
    /// Last swing state.
    #[serde(default)]
    pub swing_mode: Option<String>,
    /// Last preset.
    #[serde(default)]
    pub preset_mode: Option<String>,
    /// Extra payload; restored verbatim when present.
    #[serde(default)]
    pub extra: Option<ExtraStoredData>,
}

impl RestoreSnapshot {
    /// Captures the restorable parts of a state.
    #[must_use]
    pub fn from_state(state: &ClimateState) -> Self {
        Self {
            hvac_mode: Some(state.hvac_mode()),
            fan_mode: state.fan_mode().map(str::to_string),
            swing_mode: state.swing_mode().map(str::to_string),
            preset_mode: state.preset_mode().map(str::to_string),
            extra: Some(ExtraStoredData::from_state(state)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_uses_host_keys() {
        let extra = ExtraStoredData {
            temperature: Some(21.0),
            target_temp_low: None,
            target_temp_high: Some(25.0),
        };
        let value = serde_json::to_value(extra).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "temperature": 21.0,
                "target_temp_low": null,
                "target_temp_high": 25.0
            })
        );
    }

    #[test]
    fn snapshot_captures_state() {
        let mut state = ClimateState::new(HvacMode::Heat);
        state.set_fan_mode("low");
        state.set_target_temperature(23.0);

        let snapshot = RestoreSnapshot::from_state(&state);
        assert_eq!(snapshot.hvac_mode, Some(HvacMode::Heat));
        assert_eq!(snapshot.fan_mode.as_deref(), Some("low"));
        assert_eq!(snapshot.swing_mode, None);
        assert_eq!(snapshot.extra.unwrap().temperature, Some(23.0));
    }

    #[test]
    fn empty_record_decodes() {
        let snapshot: RestoreSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snapshot, RestoreSnapshot::default());
    }
}
