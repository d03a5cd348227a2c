// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Climate entity state.
//!
//! [`ClimateState`] is the mutable attribute bag of one entity; the command
//! composer reads it and the entity setters write it. [`RestoreSnapshot`]
//! is what the host persists between restarts.

mod climate_state;
mod snapshot;

pub use climate_state::ClimateState;
pub use snapshot::{ExtraStoredData, RestoreSnapshot};
