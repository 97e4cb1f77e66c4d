//! Executor boundary over real service calls against a mock backend.

use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tempo_client::testing::{MemoryTokenStore, RecordingNotifier};
use tempo_client::{ClientRegistry, Executor, Session, TokenProvider, Verifier};

const LOGIN: &str = "/tempo.v1.AuthenticationService/Login";
const MANAGEMENT_GET: &str = "/tempo.v1.ManagementService/Get";

struct Harness {
    store: MemoryTokenStore,
    provider: Arc<TokenProvider>,
    registry: ClientRegistry,
    notifier: Arc<RecordingNotifier>,
    executor: Executor,
}

fn harness(server: &MockServer) -> Harness {
    let session = Arc::new(Session::new(server.uri()));
    let store = MemoryTokenStore::default();
    let provider = Arc::new(TokenProvider::new(session.clone(), Arc::new(store.clone())));
    let registry = ClientRegistry::new(session, provider.clone());
    let notifier = Arc::new(RecordingNotifier::default());
    let executor = Executor::new(notifier.clone());
    Harness { store, provider, registry, notifier, executor }
}

#[tokio::test]
async fn test_expired_token_recovers_silently() {
    let server = MockServer::start().await;
    // The stale token is attached, the server rejects it.
    Mock::given(method("POST"))
        .and(path(MANAGEMENT_GET))
        .and(header("authorization", "stale"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"code": "unauthenticated", "message": "token expired"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    // The recovery re-runs the refresh login and obtains a fresh token.
    Mock::given(method("POST"))
        .and(path(LOGIN))
        .and(body_json(json!({"verifier": {}, "autoRefresh": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.preload("stale");

    let management = h.registry.management();
    let provider = h.provider.clone();
    let result = h
        .executor
        .run_recovering(
            async move { management.get().await },
            move || async move {
                provider.login(&Verifier::Empty).await?;
                Ok(())
            },
            |_| {},
        )
        .await;

    assert!(result.is_none());
    // Recovered failures are silent; the user only sees the login prompt
    // the UI layer attaches to this path.
    assert!(h.notifier.notifications().is_empty());
    assert_eq!(h.store.stored().as_deref(), Some("fresh"));
}

#[tokio::test]
async fn test_server_failure_is_reported_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MANAGEMENT_GET))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"code": "internal", "message": "profile store down"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.preload("live");

    let management = h.registry.management();
    let result = h.executor.run(async move { management.get().await }, |_| {}).await;

    assert!(result.is_none());
    let notifications = h.notifier.notifications();
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].0, "RpcError");
    assert!(notifications[0].1.contains("profile store down"));
}

#[tokio::test]
async fn test_success_passes_value_through_and_toggles_processing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MANAGEMENT_GET))
        .and(header("authorization", "live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "user": {"id": "u1", "username": "user", "score": 1200}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let h = harness(&server);
    h.store.preload("live");

    let management = h.registry.management();
    let mut transitions = Vec::new();
    let user = h
        .executor
        .run(async move { management.get().await }, |processing| transitions.push(processing))
        .await
        .expect("call should succeed");

    assert_eq!(user.id, "u1");
    assert_eq!(user.score, 1200);
    assert_eq!(transitions, vec![true, false]);
    assert!(h.notifier.notifications().is_empty());
}
