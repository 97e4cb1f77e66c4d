//! End-to-end token lifecycle against a mock Connect backend.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tempo_client::testing::MemoryTokenStore;
use tempo_client::{Session, TokenProvider, Verifier};

const LOGIN: &str = "/tempo.v1.AuthenticationService/Login";
const LOGOUT: &str = "/tempo.v1.AuthenticationService/Logout";

fn provider(server: &MockServer, store: MemoryTokenStore) -> (Arc<Session>, TokenProvider) {
    let session = Arc::new(Session::new(server.uri()));
    let provider = TokenProvider::new(session.clone(), Arc::new(store));
    (session, provider)
}

#[tokio::test]
async fn test_empty_store_runs_one_refresh_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN))
        .and(body_json(json!({"verifier": {}, "autoRefresh": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::default();
    let (session, provider) = provider(&server, store.clone());

    let token = provider.get_token().await.expect("login should succeed");
    assert_eq!(token, "fresh");
    assert_eq!(store.stored().as_deref(), Some("fresh"));
    assert_eq!(session.token(), "fresh");
}

#[tokio::test]
async fn test_stored_token_resolves_with_zero_rpcs() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).and(path(LOGIN)).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let store = MemoryTokenStore::default();
    store.preload("cached");
    let (_session, provider) = provider(&server, store);

    let token = provider.get_token().await.expect("cached token should resolve");
    assert_eq!(token, "cached");
}

#[tokio::test]
async fn test_two_phase_login_persists_only_the_issued_token() {
    let server = MockServer::start().await;
    // Phase 1: the server sends a one-time code and issues nothing yet.
    Mock::given(method("POST"))
        .and(path(LOGIN))
        .and(body_json(json!({"verifier": {"channel": "user@example.com"}, "autoRefresh": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": ""})))
        .expect(1)
        .mount(&server)
        .await;
    // Phase 2: the submitted code yields the session token.
    Mock::given(method("POST"))
        .and(path(LOGIN))
        .and(body_json(json!({"verifier": {"code": "123-456"}, "autoRefresh": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc123"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::default();
    let (session, provider) = provider(&server, store.clone());

    let phase1 = provider
        .login(&Verifier::Channel("user@example.com".to_string()))
        .await
        .expect("phase 1 should succeed");
    assert_eq!(phase1, "");
    assert_eq!(store.stored(), None);
    assert_eq!(session.token(), "");

    let phase2 = provider
        .login(&Verifier::Code("123-456".to_string()))
        .await
        .expect("phase 2 should succeed");
    assert_eq!(phase2, "abc123");
    assert_eq!(store.stored().as_deref(), Some("abc123"));
    assert_eq!(session.token(), "abc123");

    // The mock expectations pin the RPC count: this must not add a third.
    let token = provider.get_token().await.expect("stored token should resolve");
    assert_eq!(token, "abc123");
}

#[tokio::test]
async fn test_empty_response_token_never_overwrites_stored_value() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": ""})))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::default();
    store.preload("existing");
    let (_session, provider) = provider(&server, store.clone());

    let token = provider
        .login(&Verifier::Channel("user@example.com".to_string()))
        .await
        .expect("phase 1 should succeed");
    assert_eq!(token, "");
    assert_eq!(store.stored().as_deref(), Some("existing"));
}

#[tokio::test]
async fn test_logout_clears_store_and_session() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGOUT))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::default();
    store.preload("live");
    let (session, provider) = provider(&server, store.clone());
    session.set_token("live");

    provider.logout().await.expect("logout should succeed");
    assert_eq!(store.stored(), None);
    assert_eq!(session.token(), "");
}

#[tokio::test]
async fn test_failed_logout_keeps_the_stored_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGOUT))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"code": "internal", "message": "session store down"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::default();
    store.preload("live");
    let (_session, provider) = provider(&server, store.clone());

    let result = provider.logout().await;
    assert!(result.is_err());
    // The remote call failed, so local state is untouched and a retry can
    // still authenticate.
    assert_eq!(store.stored().as_deref(), Some("live"));
}

#[tokio::test]
async fn test_concurrent_resolvers_share_one_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGIN))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"token": "fresh"}))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let store = MemoryTokenStore::default();
    let (_session, provider) = provider(&server, store);

    let (first, second) = tokio::join!(provider.get_token(), provider.get_token());
    assert_eq!(first.expect("first resolver should succeed"), "fresh");
    assert_eq!(second.expect("second resolver should succeed"), "fresh");
}
