// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the REST transmitter using wiremock.

#![cfg(feature = "http")]

use std::sync::Arc;
use std::time::Duration;

use climate_remote_lib::config::Target;
use climate_remote_lib::error::TransmitError;
use climate_remote_lib::protocol::{
    HomeAssistantConfig, HomeAssistantTransmitter, SendOptions, SendRequest, Transmitter,
};
use climate_remote_lib::types::HvacMode;
use climate_remote_lib::{DispatchOutcome, setup};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SERVICE_PATH: &str = "/api/services/remote/send_command";

fn transmitter(server: &MockServer) -> HomeAssistantTransmitter {
    HomeAssistantConfig::new(server.uri(), "secret-token")
        .with_timeout(Duration::from_secs(2))
        .into_transmitter()
        .unwrap()
}

fn request(codes: &[&str]) -> SendRequest {
    SendRequest::new(
        codes.iter().map(ToString::to_string).collect(),
        "test",
        &Target::entity("remote.test_entity"),
        SendOptions::CLIMATE,
    )
}

// ============================================================================
// HomeAssistantTransmitter
// ============================================================================

mod transmitter {
    use super::*;

    #[tokio::test]
    async fn posts_service_payload_with_bearer_token() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SERVICE_PATH))
            .and(header("authorization", "Bearer secret-token"))
            .and(body_json(serde_json::json!({
                "command": ["mode:cool_fan:low"],
                "device": "test",
                "entity_id": ["remote.test_entity"],
                "num_repeats": 1,
                "delay_secs": 1,
                "hold_secs": 0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        transmitter(&mock_server)
            .send_command(&request(&["mode:cool_fan:low"]))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn bad_request_is_not_taught() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SERVICE_PATH))
            .respond_with(ResponseTemplate::new(400))
            .mount(&mock_server)
            .await;

        let err = transmitter(&mock_server)
            .send_command(&request(&["fan:turbo"]))
            .await
            .unwrap_err();

        match err {
            TransmitError::NotTaught { codes, device } => {
                assert_eq!(codes, vec!["fan:turbo".to_string()]);
                assert_eq!(device, "test");
            }
            other => panic!("expected NotTaught, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unauthorized_is_authentication_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SERVICE_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let err = transmitter(&mock_server)
            .send_command(&request(&["off"]))
            .await
            .unwrap_err();
        assert!(matches!(err, TransmitError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn server_error_is_connection_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SERVICE_PATH))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let err = transmitter(&mock_server)
            .send_command(&request(&["off"]))
            .await
            .unwrap_err();
        assert!(matches!(err, TransmitError::ConnectionFailed(ref m) if m.contains("500")));
    }
}

// ============================================================================
// Entities over HTTP
// ============================================================================

mod entities {
    use super::*;

    fn record() -> serde_json::Value {
        serde_json::json!({
            "device": "test",
            "target": { "entity_id": ["remote.test_entity"] },
            "temperature": { "mode": "target", "min": 18, "max": 28 },
            "swing": { "mode": "toggle", "modes": ["vertical"] },
            "hvac_modes": { "off": {}, "cool": {} },
            "fan_modes": ["low", "high"],
            "grouping_attributes": ["hvac_mode", "fan_mode", "temperature"]
        })
    }

    #[tokio::test]
    async fn climate_entity_end_to_end() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SERVICE_PATH))
            .and(body_json(serde_json::json!({
                "command": ["on"],
                "device": "test",
                "entity_id": ["remote.test_entity"],
                "num_repeats": 1,
                "delay_secs": 1,
                "hold_secs": 0
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path(SERVICE_PATH))
            .and(body_json(serde_json::json!({
                "command": ["mode:cool_fan:low_temp:18.0"],
                "device": "test",
                "entity_id": ["remote.test_entity"],
                "num_repeats": 1,
                "delay_secs": 1,
                "hold_secs": 0
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let record = record();
        let entity = setup::setup_climate(Some(&record), Arc::new(transmitter(&mock_server)))
            .unwrap()
            .unwrap()
            .with_power_on_delay(Duration::from_millis(10));

        let outcome = entity.set_hvac_mode(HvacMode::Cool).await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Sent);
    }

    #[tokio::test]
    async fn unlearned_fan_code_keeps_state() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SERVICE_PATH))
            .respond_with(ResponseTemplate::new(400))
            .mount(&mock_server)
            .await;

        let record = record();
        let entity = setup::setup_climate(Some(&record), Arc::new(transmitter(&mock_server)))
            .unwrap()
            .unwrap();

        let outcome = entity.set_fan_mode("high").await.unwrap();
        assert_eq!(outcome, DispatchOutcome::NotTaught);
        assert_eq!(entity.state().fan_mode(), Some("high"));
    }

    #[tokio::test]
    async fn swing_button_sends_without_delay() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(SERVICE_PATH))
            .and(body_json(serde_json::json!({
                "command": ["swing:vertical"],
                "device": "test",
                "entity_id": ["remote.test_entity"],
                "num_repeats": 1,
                "delay_secs": 0,
                "hold_secs": 0
            })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let record = record();
        let buttons =
            setup::setup_buttons(Some(&record), Arc::new(transmitter(&mock_server))).unwrap();
        assert_eq!(buttons.len(), 1);

        assert!(buttons[0].press().await.is_sent());
    }

    #[tokio::test]
    async fn unreachable_host_is_absorbed() {
        let transmitter = HomeAssistantConfig::new("http://127.0.0.1:1", "secret-token")
            .with_timeout(Duration::from_millis(500))
            .into_transmitter()
            .unwrap();
        let record = record();
        let entity = setup::setup_climate(Some(&record), Arc::new(transmitter))
            .unwrap()
            .unwrap();

        let outcome = entity.set_fan_mode("low").await.unwrap();
        assert_eq!(outcome, DispatchOutcome::Failed);
    }
}
