// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Remote code composition.
//!
//! A remote code is an opaque string the transmitter has learned. This
//! library names codes after the climate state they reproduce:
//!
//! | Attribute | Code |
//! |-----------|------|
//! | `hvac_mode` | `mode:heat` |
//! | `fan_mode` | `fan:medium` |
//! | `swing_mode` | `swing:vertical` |
//! | `preset_mode` | `preset:boost` |
//! | `temperature` | `temp:20.0` / `temp:20.5` |
//! | `temperature_range` | `temprange:18.0:24.0` |
//! | `humidity` | `humid:45` |
//!
//! Attributes listed in the grouping configuration are combined: changing
//! any of them produces one code covering all of them, either joined with
//! `_` or as a sequence of codes.
//!
//! # Examples
//!
//! ```
//! use climate_remote_lib::command::{RemoteCommand, command_for};
//! use climate_remote_lib::config::{ClimateConfig, Target};
//! use climate_remote_lib::state::ClimateState;
//! use climate_remote_lib::types::{Attribute, HvacMode, TemperatureConf};
//!
//! let config = ClimateConfig::builder("ac", Target::entity("remote.ir"))
//!     .temperature(TemperatureConf::target(16.0, 30.0))
//!     .hvac_modes([HvacMode::Heat])
//!     .fan_modes(["low", "medium"])
//!     .grouping_attributes([Attribute::HvacMode, Attribute::FanMode, Attribute::Temperature])
//!     .build()
//!     .unwrap();
//!
//! let mut state = ClimateState::from_config(&config);
//! state.set_fan_mode("medium");
//! state.set_target_temperature(20.0);
//!
//! assert_eq!(
//!     command_for(&Attribute::HvacMode, &state, &config),
//!     RemoteCommand::single("mode:heat_fan:medium_temp:20.0")
//! );
//! ```

mod compose;

pub use compose::{attribute_command, command_for};

/// Code that powers the appliance on.
pub const POWER_ON: &str = "on";

/// Code that powers the appliance off.
pub const POWER_OFF: &str = "off";

/// One or more codes to send in a single transmitter call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCommand {
    /// A single code.
    Single(String),
    /// Several codes sent in order.
    Sequence(Vec<String>),
}

impl RemoteCommand {
    /// Creates a single-code command.
    #[must_use]
    pub fn single(code: impl Into<String>) -> Self {
        Self::Single(code.into())
    }

    /// The power-on code.
    #[must_use]
    pub fn on() -> Self {
        Self::single(POWER_ON)
    }

    /// The power-off code.
    #[must_use]
    pub fn off() -> Self {
        Self::single(POWER_OFF)
    }

    /// Returns the codes in send order.
    #[must_use]
    pub fn codes(&self) -> &[String] {
        match self {
            Self::Single(code) => std::slice::from_ref(code),
            Self::Sequence(codes) => codes,
        }
    }

    /// Consumes the command and returns its codes in send order.
    #[must_use]
    pub fn into_codes(self) -> Vec<String> {
        match self {
            Self::Single(code) => vec![code],
            Self::Sequence(codes) => codes,
        }
    }
}

impl std::fmt::Display for RemoteCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(code) => f.write_str(code),
            Self::Sequence(codes) => write!(f, "{codes:?}"),
        }
    }
}
