// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Swing (louver) control styles.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// How the remote controls the louvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SwingMode {
    /// Swing cannot be controlled.
    #[default]
    None,
    /// Each swing mode is a stateless toggle key on the remote.
    ///
    /// Exposed as one button per mode instead of a climate attribute.
    Toggle,
    /// The remote selects one of several swing states.
    #[serde(rename = "state")]
    Stateful,
}

impl FromStr for SwingMode {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Self::None),
            "toggle" => Ok(Self::Toggle),
            "state" => Ok(Self::Stateful),
            _ => Err(ValueError::InvalidSwingMode(s.to_string())),
        }
    }
}
