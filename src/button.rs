// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Buttons for toggle-style swing control.
//!
//! Many remotes have swing keys that flip louver motion on and off instead
//! of selecting a state. Such keys cannot be modeled as a climate
//! attribute; each one becomes a stateless button.

use crate::command::RemoteCommand;
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::protocol::Transmitter;

/// A button sending one swing toggle code.
///
/// # Examples
///
/// ```
/// use climate_remote_lib::button::SwingToggleButton;
/// use climate_remote_lib::config::Target;
/// use climate_remote_lib::dispatch::Dispatcher;
/// use climate_remote_lib::error::TransmitError;
/// use climate_remote_lib::protocol::{SendOptions, SendRequest, Transmitter};
///
/// struct Noop;
///
/// impl Transmitter for Noop {
///     async fn send_command(&self, _: &SendRequest) -> Result<(), TransmitError> {
///         Ok(())
///     }
/// }
///
/// let dispatcher = Dispatcher::new(Noop, "ac", Target::entity("remote.ir"), SendOptions::BUTTON);
/// let button = SwingToggleButton::new("vertical", dispatcher);
///
/// assert_eq!(button.name(), "swing vertical");
/// assert_eq!(button.code(), "swing:vertical");
/// ```
#[derive(Debug, Clone)]
pub struct SwingToggleButton<T> {
    mode: String,
    dispatcher: Dispatcher<T>,
}

impl<T: Transmitter> SwingToggleButton<T> {
    /// Creates a button for one swing key.
    ///
    /// The dispatcher should use [`SendOptions::BUTTON`](crate::protocol::SendOptions::BUTTON).
    #[must_use]
    pub fn new(mode: impl Into<String>, dispatcher: Dispatcher<T>) -> Self {
        Self {
            mode: mode.into(),
            dispatcher,
        }
    }

    /// Returns the swing key.
    #[must_use]
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> String {
        format!("swing {}", self.mode)
    }

    /// Returns the code sent on press.
    #[must_use]
    pub fn code(&self) -> String {
        format!("swing:{}", self.mode)
    }

    /// Sends the toggle code.
    pub async fn press(&self) -> DispatchOutcome {
        self.dispatcher.send(RemoteCommand::Single(self.code())).await
    }
}
