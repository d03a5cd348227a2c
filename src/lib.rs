// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate Remote Lib - control infrared/RF climate appliances from Rust.
//!
//! Air conditioners without a network API can still be driven by replaying
//! remote codes through a learning transmitter. This library turns climate
//! requests (HVAC mode, fan, swing, preset, target temperature and
//! humidity) into the names of learned codes and sends them through the
//! host's `remote.send_command` service.
//!
//! # Concepts
//!
//! - **Configuration** ([`config::ClimateConfig`]): modes, temperature
//!   ranges, grouping rules and the transmitter target.
//! - **Capabilities** ([`ClimateFeatures`]): which controls are active,
//!   recomputed whenever the HVAC mode changes.
//! - **Commands** ([`command`]): pure composition of code names such as
//!   `mode:heat_fan:medium_temp:20.0` from the current state.
//! - **Dispatch** ([`dispatch::Dispatcher`]): sends codes and turns
//!   "never learned" failures into warnings.
//!
//! # Quick Start
//!
//! ```no_run
//! use climate_remote_lib::{ClimateEntity, TemperatureRequest};
//! use climate_remote_lib::config::{ClimateConfig, Target};
//! use climate_remote_lib::protocol::HomeAssistantConfig;
//! use climate_remote_lib::types::{Attribute, HvacMode, TemperatureConf};
//!
//! #[tokio::main]
//! async fn main() -> climate_remote_lib::Result<()> {
//!     let config = ClimateConfig::builder("living_room_ac", Target::entity("remote.broadlink"))
//!         .temperature(TemperatureConf::target(16.0, 30.0))
//!         .hvac_modes([HvacMode::Off, HvacMode::Cool, HvacMode::Heat])
//!         .fan_modes(["auto", "low", "high"])
//!         .grouping_attributes([Attribute::HvacMode, Attribute::FanMode, Attribute::Temperature])
//!         .build()?;
//!
//!     let transmitter = HomeAssistantConfig::new("http://homeassistant.local:8123", "token")
//!         .into_transmitter()?;
//!     let ac = ClimateEntity::new(config, transmitter);
//!
//!     // Sends "on", waits a second, then "mode:cool_fan:auto_temp:16.0"
//!     ac.set_hvac_mode(HvacMode::Cool).await?;
//!     // Sends "mode:cool_fan:auto_temp:22.0"
//!     ac.set_temperature(TemperatureRequest::target(22.0)).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `http` (default): [`protocol::HomeAssistantTransmitter`] over the REST API
//! - `mqtt` (default): [`protocol::MqttTransmitter`] publishing to a bridge

pub mod button;
mod capabilities;
pub mod climate;
pub mod command;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod protocol;
pub mod sensor;
pub mod setup;
pub mod state;
pub mod types;

pub use button::SwingToggleButton;
pub use capabilities::{ClimateFeatures, active_grouping_attributes, resolve_temperature_conf};
pub use climate::{ClimateEntity, TemperatureRequest};
pub use command::{RemoteCommand, attribute_command, command_for};
pub use config::{ClimateConfig, ClimateConfigBuilder, GroupingDispatch, Target};
pub use dispatch::{DispatchOutcome, Dispatcher};
pub use error::{ConfigError, Error, ParseError, Result, TransmitError, ValueError};
pub use protocol::{SendOptions, SendRequest, Transmitter};
pub use types::{
    Attribute, Humidity, HvacMode, SwingMode, TemperatureConf, TemperatureMode, TemperatureUnit,
};
