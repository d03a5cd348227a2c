// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pure functions turning climate state into remote codes.

use super::RemoteCommand;
use crate::capabilities::active_grouping_attributes;
use crate::config::{ClimateConfig, GroupingDispatch};
use crate::state::ClimateState;
use crate::types::Attribute;

/// Returns the code token for one attribute.
///
/// The token is `<prefix>:<value>`. Attributes without a code prefix, or
/// whose value is unset, yield an empty string.
///
/// # Examples
///
/// ```
/// use climate_remote_lib::command::attribute_command;
/// use climate_remote_lib::state::ClimateState;
/// use climate_remote_lib::types::{Attribute, HvacMode};
///
/// let mut state = ClimateState::new(HvacMode::Cool);
/// state.set_target_temperature(21.5);
///
/// assert_eq!(attribute_command(&Attribute::HvacMode, &state), "mode:cool");
/// assert_eq!(attribute_command(&Attribute::Temperature, &state), "temp:21.5");
/// assert_eq!(attribute_command(&Attribute::FanMode, &state), "");
/// assert_eq!(attribute_command(&Attribute::from("dummy"), &state), "");
/// ```
#[must_use]
pub fn attribute_command(attribute: &Attribute, state: &ClimateState) -> String {
    let Some(prefix) = attribute.code_prefix() else {
        return String::new();
    };
    let value = match attribute {
        Attribute::HvacMode => Some(state.hvac_mode().to_string()),
        Attribute::FanMode => state.fan_mode().map(str::to_string),
        Attribute::SwingMode => state.swing_mode().map(str::to_string),
        Attribute::PresetMode => state.preset_mode().map(str::to_string),
        Attribute::Temperature => state.target_temperature().map(format_temperature),
        Attribute::TemperatureRange => state
            .target_temperature_low()
            .zip(state.target_temperature_high())
            .map(|(low, high)| {
                format!("{}:{}", format_temperature(low), format_temperature(high))
            }),
        Attribute::Humidity => state.target_humidity().map(|h| h.to_string()),
        Attribute::Other(_) => None,
    };
    match value {
        Some(value) if !value.is_empty() => format!("{prefix}:{value}"),
        _ => String::new(),
    }
}

/// Formats a temperature as learned code names spell it.
///
/// Whole values keep one decimal (`20.0`), others use the shortest exact
/// form (`20.5`, `20.25`).
fn format_temperature(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

/// Returns the command to send after `attribute` changed.
///
/// An attribute outside the active grouping list maps to its own token.
/// Otherwise every active grouping attribute contributes a token, in
/// configured order. Empty tokens are kept, so a joined code may contain
/// doubled or trailing underscores.
#[must_use]
pub fn command_for(
    attribute: &Attribute,
    state: &ClimateState,
    config: &ClimateConfig,
) -> RemoteCommand {
    let grouping = active_grouping_attributes(
        &config.grouping_attributes,
        &state.features(),
        &config.fan_modes,
        config.swing.stateful_modes(),
    );
    if !grouping.contains(attribute) {
        return RemoteCommand::Single(attribute_command(attribute, state));
    }

    let tokens: Vec<String> = grouping
        .iter()
        .map(|grouped| attribute_command(grouped, state))
        .collect();
    match config.grouping_dispatch {
        GroupingDispatch::Joined => RemoteCommand::Single(tokens.join("_")),
        GroupingDispatch::Sequence => RemoteCommand::Sequence(tokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Target;
    use crate::types::{Humidity, HvacMode, SwingMode, TemperatureConf};

    fn config(grouping: Vec<Attribute>) -> ClimateConfig {
        ClimateConfig::builder("test", Target::entity("remote.test_entity"))
            .temperature(TemperatureConf::target(16.0, 30.0))
            .hvac_modes([HvacMode::Off, HvacMode::Heat, HvacMode::Cool])
            .fan_modes(["low", "medium", "high"])
            .preset_modes(["none", "eco"])
            .swing(SwingMode::Stateful, ["vertical", "horizontal"])
            .with_humidity()
            .grouping_attributes(grouping)
            .build()
            .unwrap()
    }

    fn heating(config: &ClimateConfig) -> ClimateState {
        let mut state = ClimateState::from_config(config);
        state.set_hvac_mode(HvacMode::Heat);
        state.refresh_capabilities(config);
        state.set_fan_mode("medium");
        state.set_target_temperature(20.0);
        state
    }

    #[test]
    fn tokens_per_attribute() {
        let config = config(Vec::new());
        let mut state = heating(&config);
        state.set_swing_mode("horizontal");
        state.set_preset_mode("eco");
        state.set_target_humidity(Humidity::new(45).unwrap());
        state.set_target_temperature_range(18.0, 24.5);

        assert_eq!(attribute_command(&Attribute::HvacMode, &state), "mode:heat");
        assert_eq!(attribute_command(&Attribute::FanMode, &state), "fan:medium");
        assert_eq!(
            attribute_command(&Attribute::SwingMode, &state),
            "swing:horizontal"
        );
        assert_eq!(attribute_command(&Attribute::PresetMode, &state), "preset:eco");
        assert_eq!(attribute_command(&Attribute::Temperature, &state), "temp:20.0");
        assert_eq!(
            attribute_command(&Attribute::TemperatureRange, &state),
            "temprange:18.0:24.5"
        );
        assert_eq!(attribute_command(&Attribute::Humidity, &state), "humid:45");
    }

    #[test]
    fn temperatures_keep_a_decimal() {
        let config = config(Vec::new());
        let mut state = heating(&config);
        for (value, expected) in [
            (20.0, "temp:20.0"),
            (20.5, "temp:20.5"),
            (19.25, "temp:19.25"),
            (-3.0, "temp:-3.0"),
            (100.0, "temp:100.0"),
        ] {
            state.set_target_temperature(value);
            assert_eq!(attribute_command(&Attribute::Temperature, &state), expected);
        }

        state.set_target_temperature_range(20.0, 22.0);
        assert_eq!(
            attribute_command(&Attribute::TemperatureRange, &state),
            "temprange:20.0:22.0"
        );
    }

    #[test]
    fn unknown_key_is_empty() {
        let config = config(Vec::new());
        let state = heating(&config);
        assert_eq!(attribute_command(&Attribute::from("dummy"), &state), "");
    }

    #[test]
    fn composer_is_deterministic() {
        let config = config(vec![Attribute::HvacMode, Attribute::Temperature]);
        let state = heating(&config);
        for attribute in Attribute::GROUPABLE {
            assert_eq!(
                attribute_command(&attribute, &state),
                attribute_command(&attribute, &state)
            );
            assert_eq!(
                command_for(&attribute, &state, &config),
                command_for(&attribute, &state, &config)
            );
        }
    }

    #[test]
    fn joined_composite() {
        let config = config(vec![
            Attribute::HvacMode,
            Attribute::FanMode,
            Attribute::Temperature,
        ]);
        let state = heating(&config);
        let expected = RemoteCommand::single("mode:heat_fan:medium_temp:20.0");
        assert_eq!(command_for(&Attribute::HvacMode, &state, &config), expected);
        assert_eq!(command_for(&Attribute::FanMode, &state, &config), expected);
        assert_eq!(command_for(&Attribute::Temperature, &state, &config), expected);
    }

    #[test]
    fn ungrouped_attribute_is_sent_alone() {
        let config = config(vec![Attribute::HvacMode, Attribute::Temperature]);
        let mut state = heating(&config);
        state.set_swing_mode("vertical");
        assert_eq!(
            command_for(&Attribute::SwingMode, &state, &config),
            RemoteCommand::single(attribute_command(&Attribute::SwingMode, &state))
        );
        assert_eq!(
            command_for(&Attribute::PresetMode, &state, &config),
            RemoteCommand::single("")
        );
    }

    #[test]
    fn sequence_composite() {
        let mut config = config(vec![
            Attribute::HvacMode,
            Attribute::FanMode,
            Attribute::Temperature,
        ]);
        config.grouping_dispatch = GroupingDispatch::Sequence;
        let state = heating(&config);
        assert_eq!(
            command_for(&Attribute::FanMode, &state, &config),
            RemoteCommand::Sequence(vec![
                "mode:heat".into(),
                "fan:medium".into(),
                "temp:20.0".into()
            ])
        );
    }

    #[test]
    fn inactive_temperature_leaves_group() {
        let config = config(vec![Attribute::HvacMode, Attribute::Temperature]);
        let mut state = heating(&config);
        state.set_hvac_mode(HvacMode::Off);
        state.refresh_capabilities(&config);

        assert_eq!(
            command_for(&Attribute::HvacMode, &state, &config),
            RemoteCommand::single("mode:off")
        );
        // no longer grouped, so composed on its own
        assert_eq!(
            command_for(&Attribute::Temperature, &state, &config),
            RemoteCommand::single("temp:20.0")
        );
    }

    #[test]
    fn unmapped_key_keeps_empty_token() {
        let config = config(vec![
            Attribute::HvacMode,
            Attribute::from("dummy"),
            Attribute::FanMode,
        ]);
        let state = heating(&config);
        assert_eq!(
            command_for(&Attribute::HvacMode, &state, &config),
            RemoteCommand::single("mode:heat__fan:medium")
        );
    }

    #[test]
    fn grouped_range() {
        let config = ClimateConfig::builder("test", Target::entity("remote.ir"))
            .temperature(TemperatureConf::range(16.0, 30.0))
            .hvac_modes([HvacMode::HeatCool])
            .grouping_attributes([
                Attribute::HvacMode,
                Attribute::Temperature,
                Attribute::TemperatureRange,
            ])
            .build()
            .unwrap();
        let mut state = ClimateState::from_config(&config);
        state.set_target_temperature_range(19.0, 23.0);
        assert_eq!(
            command_for(&Attribute::TemperatureRange, &state, &config),
            RemoteCommand::single("mode:heat_cool_temprange:19.0:23.0")
        );
    }

    #[test]
    fn grouped_humidity_has_a_value_before_first_set() {
        let config = config(vec![Attribute::HvacMode, Attribute::Humidity]);
        let state = heating(&config);
        assert_eq!(
            command_for(&Attribute::HvacMode, &state, &config),
            RemoteCommand::single("mode:heat_humid:30")
        );
    }
}
