// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sending composed commands through a transmitter.
//!
//! The [`Dispatcher`] is the boundary where appliance communication
//! failures stop: it never returns an error. An unlearned code becomes a
//! warning telling the user to learn it, any other failure is logged.

use std::sync::Arc;

use crate::command::RemoteCommand;
use crate::config::Target;
use crate::protocol::{SendOptions, SendRequest, Transmitter};

/// Result of one dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The transmitter accepted the codes.
    Sent,
    /// The transmitter has never learned the codes.
    NotTaught,
    /// The transmitter could not be reached.
    Failed,
}

impl DispatchOutcome {
    /// Returns `true` if the codes were sent.
    #[must_use]
    pub fn is_sent(self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Sends commands for one device and target.
///
/// # Examples
///
/// ```
/// use climate_remote_lib::command::RemoteCommand;
/// use climate_remote_lib::config::Target;
/// use climate_remote_lib::dispatch::{DispatchOutcome, Dispatcher};
/// use climate_remote_lib::error::TransmitError;
/// use climate_remote_lib::protocol::{SendOptions, SendRequest, Transmitter};
///
/// struct Unlearned;
///
/// impl Transmitter for Unlearned {
///     async fn send_command(&self, request: &SendRequest) -> Result<(), TransmitError> {
///         Err(request.not_taught())
///     }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let dispatcher = Dispatcher::new(Unlearned, "ac", Target::entity("remote.ir"), SendOptions::CLIMATE);
/// let outcome = dispatcher.send(RemoteCommand::single("mode:cool")).await;
/// assert_eq!(outcome, DispatchOutcome::NotTaught);
/// # }
/// ```
#[derive(Debug)]
pub struct Dispatcher<T> {
    transmitter: Arc<T>,
    device: String,
    target: Target,
    options: SendOptions,
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Self {
            transmitter: Arc::clone(&self.transmitter),
            device: self.device.clone(),
            target: self.target.clone(),
            options: self.options,
        }
    }
}

impl<T: Transmitter> Dispatcher<T> {
    /// Creates a dispatcher owning its transmitter.
    #[must_use]
    pub fn new(
        transmitter: T,
        device: impl Into<String>,
        target: Target,
        options: SendOptions,
    ) -> Self {
        Self::shared(Arc::new(transmitter), device, target, options)
    }

    /// Creates a dispatcher over a shared transmitter.
    #[must_use]
    pub fn shared(
        transmitter: Arc<T>,
        device: impl Into<String>,
        target: Target,
        options: SendOptions,
    ) -> Self {
        Self {
            transmitter,
            device: device.into(),
            target,
            options,
        }
    }

    /// Returns the transmitter.
    #[must_use]
    pub fn transmitter(&self) -> &Arc<T> {
        &self.transmitter
    }

    /// Returns the device identifier.
    #[must_use]
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Returns the target.
    #[must_use]
    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Sends a command, warning if it was never learned.
    pub async fn send(&self, command: RemoteCommand) -> DispatchOutcome {
        self.dispatch(command, true).await
    }

    /// Sends a command without the "should learn" warning.
    ///
    /// Used for the power-on code, which many remotes fold into the mode
    /// code.
    pub async fn send_without_hint(&self, command: RemoteCommand) -> DispatchOutcome {
        self.dispatch(command, false).await
    }

    async fn dispatch(&self, command: RemoteCommand, should_learn: bool) -> DispatchOutcome {
        let request = SendRequest::new(
            command.into_codes(),
            self.device.as_str(),
            &self.target,
            self.options,
        );

        tracing::debug!(
            codes = ?request.codes,
            device = %self.device,
            target = ?self.target,
            "Calling remote.send_command"
        );

        match self.transmitter.send_command(&request).await {
            Ok(()) => DispatchOutcome::Sent,
            Err(e) if e.is_not_taught() => {
                if should_learn {
                    tracing::warn!(
                        "Command \"{:?}\" for device \"{}\" not found. You should learn it.",
                        request.codes,
                        self.device
                    );
                }
                DispatchOutcome::NotTaught
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    codes = ?request.codes,
                    device = %self.device,
                    "Failed to send remote command"
                );
                DispatchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransmitError;
    use parking_lot::Mutex;
    use tracing::subscriber::DefaultGuard;

    #[derive(Default)]
    struct Scripted {
        requests: Mutex<Vec<SendRequest>>,
        fail_with: Option<fn(&SendRequest) -> TransmitError>,
    }

    impl Transmitter for Scripted {
        async fn send_command(&self, request: &SendRequest) -> Result<(), TransmitError> {
            self.requests.lock().push(request.clone());
            match self.fail_with {
                Some(fail) => Err(fail(request)),
                None => Ok(()),
            }
        }
    }

    /// Collects formatted log lines of the current thread.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl CapturedLogs {
        fn install() -> (Self, DefaultGuard) {
            let logs = Self::default();
            let subscriber = tracing_subscriber::fmt()
                .with_writer(logs.clone())
                .with_ansi(false)
                .with_max_level(tracing::Level::WARN)
                .finish();
            (logs, tracing::subscriber::set_default(subscriber))
        }

        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = Self;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn dispatcher(transmitter: Scripted) -> Dispatcher<Scripted> {
        Dispatcher::new(
            transmitter,
            "test",
            Target::entity("remote.test_entity"),
            SendOptions::CLIMATE,
        )
    }

    #[tokio::test]
    async fn sent_request_carries_device_and_target() {
        let dispatcher = dispatcher(Scripted::default());
        let outcome = dispatcher
            .send(RemoteCommand::Sequence(vec!["a".into(), "b".into()]))
            .await;
        assert!(outcome.is_sent());

        let requests = dispatcher.transmitter().requests.lock();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].codes, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(requests[0].device, "test");
        assert_eq!(requests[0].target, Target::entity("remote.test_entity"));
        assert_eq!(requests[0].options, SendOptions::CLIMATE);
    }

    #[tokio::test]
    async fn not_taught_is_absorbed() {
        let dispatcher = dispatcher(Scripted {
            fail_with: Some(SendRequest::not_taught),
            ..Scripted::default()
        });
        assert_eq!(
            dispatcher.send(RemoteCommand::single("fan:low")).await,
            DispatchOutcome::NotTaught
        );
        assert_eq!(
            dispatcher.send_without_hint(RemoteCommand::on()).await,
            DispatchOutcome::NotTaught
        );
    }

    #[tokio::test]
    async fn transport_failure_is_absorbed() {
        let dispatcher = dispatcher(Scripted {
            fail_with: Some(|_| TransmitError::ConnectionFailed("down".to_string())),
            ..Scripted::default()
        });
        assert_eq!(
            dispatcher.send(RemoteCommand::off()).await,
            DispatchOutcome::Failed
        );
    }

    #[tokio::test]
    async fn not_taught_warning_names_codes_and_device() {
        let (logs, _guard) = CapturedLogs::install();
        let dispatcher = dispatcher(Scripted {
            fail_with: Some(SendRequest::not_taught),
            ..Scripted::default()
        });

        dispatcher.send(RemoteCommand::single("fan:low")).await;

        let logs = logs.contents();
        assert!(logs.contains("WARN"), "{logs}");
        assert!(
            logs.contains(r#"Command "["fan:low"]" for device "test" not found. You should learn it."#),
            "{logs}"
        );
    }

    #[tokio::test]
    async fn power_on_is_sent_without_learn_warning() {
        let (logs, _guard) = CapturedLogs::install();
        let dispatcher = dispatcher(Scripted {
            fail_with: Some(SendRequest::not_taught),
            ..Scripted::default()
        });

        dispatcher.send_without_hint(RemoteCommand::on()).await;

        assert!(!logs.contents().contains("You should learn it"));
    }
}
