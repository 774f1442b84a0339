/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for consumer-host-client tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use consumer_host_client::{
    ConsumerHostClient, ConsumerHostServices, LoginDomain, MemoryTokenStore, Notification,
    Notifier, ServicesOptions,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCOUNT: &str = "0xABC";
pub const SIGNATURE: &str = "0xsig";

/// Setup a mock HTTP server for testing
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Body the server sends when the session token is missing or stale
pub fn not_login_body() -> serde_json::Value {
    serde_json::json!({"code": "403", "error": "not login"})
}

pub fn api_key_json(id: u64, name: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "user_id": 1,
        "name": name,
        "value": "key-value",
        "times": 0,
        "created_at": "2023-01-01T00:00:00",
        "updated_at": "2023-01-01T00:00:00"
    })
}

/// Mount `POST /login` answering with `token`, expected `times` times
pub async fn mount_login(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": token,
        })))
        .expect(times)
        .mount(server)
        .await;
}

pub fn services(
    server: &MockServer,
    store: Arc<MemoryTokenStore>,
    options: ServicesOptions,
) -> ConsumerHostServices {
    let client = ConsumerHostClient::new(&server.uri()).expect("client init");
    ConsumerHostServices::new(client, store, LoginDomain::default(), options)
}

/// Notifier that keeps every notification it receives
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub received: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn count(&self) -> usize {
        self.received.lock().unwrap().len()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.received.lock().unwrap().push(notification.clone());
    }
}
