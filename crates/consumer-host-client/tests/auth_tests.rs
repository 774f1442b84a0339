/*
[INPUT]:  Mock login responses and scripted wallets
[OUTPUT]: Test results for the login flow and token cache
[POS]:    Integration tests - authentication
[UPDATE]: When login endpoint or caching rules change
*/

mod common;

use std::sync::Arc;

use common::{ACCOUNT, SIGNATURE, mount_login, setup_mock_server};
use consumer_host_client::auth::token_key;
use consumer_host_client::{
    AuthManager, ConsumerHostClient, ConsumerHostError, LoginDomain, LoginStatus,
    MemoryTokenStore, MockWalletSigner, TokenStore,
};
use tokio_test::assert_ok;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

fn auth_manager(uri: &str, store: Arc<MemoryTokenStore>) -> AuthManager {
    let client = assert_ok!(ConsumerHostClient::new(uri));
    AuthManager::new(client, store, LoginDomain::default())
}

#[tokio::test]
async fn test_login_without_cache_signs_and_exchanges_once() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_partial_json(serde_json::json!({
            "consumer": ACCOUNT,
            "chainId": 137,
            "signature": SIGNATURE,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "token": "tok1",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let manager = auth_manager(&server.uri(), store.clone());
    let wallet = MockWalletSigner::new(ACCOUNT, SIGNATURE);

    let status = manager.login(&wallet, false).await;

    assert_eq!(status, LoginStatus::ok());
    assert_eq!(wallet.sign_calls(), 1);

    let signed = wallet.last_message().expect("wallet was asked to sign");
    assert_eq!(signed.consumer, ACCOUNT);
    assert!(signed.timestamp > 0);

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
    let posted: serde_json::Value = assert_ok!(requests[0].body_json());
    assert_eq!(posted["timestamp"], serde_json::json!(signed.timestamp));
    assert_eq!(posted["consumer"], serde_json::json!(signed.consumer));

    assert_eq!(store.load(ACCOUNT), Some("tok1".to_string()));
    assert_eq!(
        manager.session().credential_for(ACCOUNT).map(|c| c.header_value()),
        Some("Bearer tok1".to_string())
    );
}

#[tokio::test]
async fn test_login_with_cache_makes_no_request() {
    let server = setup_mock_server().await;
    mount_login(&server, "unused", 0).await;

    let store = Arc::new(MemoryTokenStore::new());
    assert_ok!(store.save(ACCOUNT, "cached"));
    let manager = auth_manager(&server.uri(), store);
    let wallet = MockWalletSigner::new(ACCOUNT, SIGNATURE);

    let status = manager.login(&wallet, false).await;

    assert_eq!(status, LoginStatus::used_cache());
    assert_eq!(status.msg, "use cache");
    assert_eq!(wallet.sign_calls(), 0);
    assert_eq!(
        manager.session().credential_for(ACCOUNT).map(|c| c.token().to_string()),
        Some("cached".to_string())
    );
}

#[tokio::test]
async fn test_refresh_bypasses_cache_and_overwrites_it() {
    let server = setup_mock_server().await;
    mount_login(&server, "tok2", 1).await;

    let store = Arc::new(MemoryTokenStore::new());
    assert_ok!(store.save(ACCOUNT, "tok1"));
    let manager = auth_manager(&server.uri(), store.clone());
    let wallet = MockWalletSigner::new(ACCOUNT, SIGNATURE);

    let status = manager.login(&wallet, true).await;

    assert_eq!(status, LoginStatus::ok());
    assert_eq!(wallet.sign_calls(), 1);
    assert_eq!(store.load(ACCOUNT), Some("tok2".to_string()));
}

#[tokio::test]
async fn test_login_server_error_is_reported_not_raised() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "code": "2021",
            "error": "Forbidden: user not approved.",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryTokenStore::new());
    let manager = auth_manager(&server.uri(), store.clone());
    let wallet = MockWalletSigner::new(ACCOUNT, SIGNATURE);

    let status = manager.login(&wallet, false).await;

    assert_eq!(status, LoginStatus::failed("Forbidden: user not approved."));
    assert!(store.load(ACCOUNT).is_none());
    assert!(manager.session().credential().is_none());
}

#[tokio::test]
async fn test_login_non_json_failure_uses_generic_message() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .expect(1)
        .mount(&server)
        .await;

    let manager = auth_manager(&server.uri(), Arc::new(MemoryTokenStore::new()));
    let wallet = MockWalletSigner::new(ACCOUNT, SIGNATURE);

    let status = manager.login(&wallet, false).await;

    assert!(!status.status);
    assert_eq!(status.msg, "Failed to request token of consumer host.");
}

#[tokio::test]
async fn test_request_token_rejects_non_success_without_error_body() {
    let server = setup_mock_server().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "token": "should-not-be-used",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let manager = auth_manager(&server.uri(), Arc::new(MemoryTokenStore::new()));
    let wallet = MockWalletSigner::new(ACCOUNT, SIGNATURE);

    let err = manager.request_token(&wallet).await.unwrap_err();
    assert!(matches!(err, ConsumerHostError::Authentication { .. }));
}

#[test]
fn test_token_store_key_layout() {
    let store = MemoryTokenStore::new();
    assert_ok!(store.save(ACCOUNT, "tok1"));
    assert_eq!(store.load(ACCOUNT), Some("tok1".to_string()));
    assert_eq!(token_key(ACCOUNT), "consumer-host-services-token-0xABC");
}
