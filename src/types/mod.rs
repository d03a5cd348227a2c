// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types for climate control.
//!
//! # Types
//!
//! - [`HvacMode`] - Operating mode (off, heat, cool, ...)
//! - [`TemperatureMode`] / [`TemperatureConf`] - Temperature capability
//! - [`TemperatureUnit`] - Celsius or Fahrenheit
//! - [`Humidity`] - Relative humidity (0-100%)
//! - [`SwingMode`] - How louvers are controlled
//! - [`Attribute`] - Attribute keys that compose into remote codes
//!
//! Fan, preset and swing states are free-form strings: remotes name them
//! in many ways and the configuration accepts custom values.

mod attribute;
mod humidity;
mod hvac_mode;
mod swing;
mod temperature;

pub use attribute::Attribute;
pub use humidity::Humidity;
pub use hvac_mode::HvacMode;
pub use swing::SwingMode;
pub use temperature::{TemperatureConf, TemperatureMode, TemperatureUnit};

/// The preset that means "no preset active".
pub const PRESET_NONE: &str = "none";
