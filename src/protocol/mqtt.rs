// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transmitter publishing `send_command` payloads to an MQTT bridge.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use rumqttc::{AsyncClient, EventLoop, MqttOptions, QoS};

use crate::error::TransmitError;
use crate::protocol::{SendRequest, Transmitter};

/// Global counter for generating unique client IDs.
static CLIENT_ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Publishes send-code requests as JSON to `<topic>/send_command`.
///
/// A bridge on the other side replays the payload against the remote
/// entity. MQTT gives no answer back, so an unlearned code cannot be
/// detected here: a successful publish is reported as success.
///
/// # Examples
///
/// ```ignore
/// use climate_remote_lib::protocol::MqttTransmitterBuilder;
///
/// let transmitter = MqttTransmitterBuilder::new()
///     .broker("mqtt://192.168.1.50:1883")
///     .topic("climate_remote/bedroom")
///     .credentials("mqtt_user", "mqtt_password")
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct MqttTransmitter {
    client: AsyncClient,
    topic: String,
}

impl MqttTransmitter {
    /// Returns the base topic.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns the topic requests are published to.
    #[must_use]
    pub fn command_topic(&self) -> String {
        command_topic(&self.topic)
    }
}

impl Transmitter for MqttTransmitter {
    async fn send_command(&self, request: &SendRequest) -> Result<(), TransmitError> {
        let topic = self.command_topic();
        let payload = serde_json::to_vec(request)?;

        tracing::debug!(topic = %topic, codes = ?request.codes, "Publishing send_command");

        self.client
            .publish(&topic, QoS::AtLeastOnce, false, payload)
            .await
            .map_err(TransmitError::Mqtt)
    }
}

fn command_topic(topic: &str) -> String {
    format!("{}/send_command", topic.trim_end_matches('/'))
}

/// Parses an MQTT URL into host and port.
fn parse_mqtt_url(url: &str) -> Result<(String, u16), TransmitError> {
    let url = url
        .strip_prefix("mqtt://")
        .or_else(|| url.strip_prefix("tcp://"))
        .unwrap_or(url);

    let (host, port) = if let Some((h, p)) = url.rsplit_once(':') {
        let port = p
            .parse()
            .map_err(|_| TransmitError::ConnectionFailed(format!("Invalid port: {p}")))?;
        (h.to_string(), port)
    } else {
        (url.to_string(), 1883)
    };

    Ok((host, port))
}

/// First delay before polling again after a connection error.
const RECONNECT_DELAY: Duration = Duration::from_secs(1);

/// Upper bound of the reconnect backoff.
const MAX_RECONNECT_DELAY: Duration = Duration::from_secs(30);

/// Returns the delay to wait after `current`, doubling up to the cap.
fn next_reconnect_delay(current: Duration) -> Duration {
    current.saturating_mul(2).min(MAX_RECONNECT_DELAY)
}

/// Drives the connection in the background.
///
/// Connection errors are retried with backoff; rumqttc reconnects on the
/// next poll. The loop ends once every client handle is dropped.
async fn handle_mqtt_events(mut event_loop: EventLoop) {
    use rumqttc::{ConnectionError, Event, Packet};

    let mut delay = RECONNECT_DELAY;
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(connack))) => {
                tracing::debug!(?connack, "MQTT connected");
                delay = RECONNECT_DELAY;
            }
            Ok(Event::Incoming(Packet::PubAck(puback))) => {
                tracing::trace!(pkid = puback.pkid, "MQTT publish acknowledged");
            }
            Ok(_) => {}
            Err(ConnectionError::RequestsDone) => {
                tracing::debug!("MQTT client dropped, event loop stopped");
                break;
            }
            Err(e) => {
                tracing::warn!(error = %e, retry_in = ?delay, "MQTT connection error");
                tokio::time::sleep(delay).await;
                delay = next_reconnect_delay(delay);
            }
        }
    }
}

/// Builder for [`MqttTransmitter`].
#[derive(Debug, Default)]
pub struct MqttTransmitterBuilder {
    broker: Option<String>,
    topic: Option<String>,
    username: Option<String>,
    password: Option<String>,
    client_id: Option<String>,
    keep_alive: Option<Duration>,
}

impl MqttTransmitterBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the MQTT broker URL.
    #[must_use]
    pub fn broker(mut self, broker: impl Into<String>) -> Self {
        self.broker = Some(broker.into());
        self
    }

    /// Sets the base topic the bridge listens under.
    #[must_use]
    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// Sets authentication credentials for the MQTT broker.
    #[must_use]
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets a custom client ID.
    #[must_use]
    pub fn client_id(mut self, id: impl Into<String>) -> Self {
        self.client_id = Some(id.into());
        self
    }

    /// Sets the keep-alive interval.
    #[must_use]
    pub fn keep_alive(mut self, duration: Duration) -> Self {
        self.keep_alive = Some(duration);
        self
    }

    /// Builds the transmitter and spawns its event loop.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns error if the broker or topic is missing or the broker URL is
    /// invalid.
    pub fn build(self) -> Result<MqttTransmitter, TransmitError> {
        let broker = self
            .broker
            .ok_or_else(|| TransmitError::ConnectionFailed("broker is required".to_string()))?;

        let topic = self
            .topic
            .ok_or_else(|| TransmitError::ConnectionFailed("topic is required".to_string()))?;

        let (host, port) = parse_mqtt_url(&broker)?;

        let client_id = self.client_id.unwrap_or_else(|| {
            let counter = CLIENT_ID_COUNTER.fetch_add(1, Ordering::Relaxed);
            format!("climate_remote_{}_{}", std::process::id(), counter)
        });

        let mut mqtt_options = MqttOptions::new(&client_id, host, port);
        mqtt_options.set_keep_alive(self.keep_alive.unwrap_or(Duration::from_secs(30)));
        mqtt_options.set_clean_session(true);

        if let (Some(username), Some(password)) = (self.username, self.password) {
            mqtt_options.set_credentials(username, password);
        }

        let (client, event_loop) = AsyncClient::new(mqtt_options, 10);
        tokio::spawn(handle_mqtt_events(event_loop));

        Ok(MqttTransmitter { client, topic })
    }
}
