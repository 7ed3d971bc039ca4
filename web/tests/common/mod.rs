//! Shared wiring for the integration suites: a test server over the real
//! router with mock host-platform providers.

use axum::http::{HeaderName, HeaderValue};
use axum_test::TestServer;
use slotboard_core::{CategoryId, Topic, TopicId, UserId};
use slotboard_roster::mocks::{MockPermissions, MockTopicRepository};
use slotboard_roster::GateConfig;
use slotboard_web::{build_router, AppState, Config};

/// The state type every suite works with.
pub type MockState = AppState<MockTopicRepository, MockPermissions>;

/// One wired-up application under test.
pub struct TestApp {
    pub server: TestServer,
    pub state: MockState,
    pub topics: MockTopicRepository,
    pub permissions: MockPermissions,
}

/// Spin up the router with mocks and the given gate config.
pub fn spawn(config: GateConfig) -> TestApp {
    let topics = MockTopicRepository::new();
    let permissions = MockPermissions::new();
    let state = AppState::new(config, topics.clone(), permissions.clone());
    let server = TestServer::new(build_router(state.clone(), &Config::default())).unwrap();
    TestApp {
        server,
        state,
        topics,
        permissions,
    }
}

/// Spin up with an open gate (no API key, all categories).
pub fn spawn_default() -> TestApp {
    spawn(GateConfig::new())
}

/// Prefix a path with the default API root.
pub fn api(path: &str) -> String {
    format!("/api/slotboard{path}")
}

/// A topic whose event is far in the future.
pub fn event_topic(id: u64, category: u64) -> Topic {
    Topic {
        id: TopicId(id),
        title: "Op Redwood 2999-01-01 19:00".to_string(),
        category_id: CategoryId(category),
        owner_user_id: UserId(1),
    }
}

/// A topic whose event has long passed.
pub fn past_event_topic(id: u64, category: u64) -> Topic {
    Topic {
        title: "Op Redwood 2001-01-01 19:00".to_string(),
        ..event_topic(id, category)
    }
}

/// A topic that is not an event at all.
pub fn plain_topic(id: u64, category: u64) -> Topic {
    Topic {
        title: "Weekly banter thread".to_string(),
        ..event_topic(id, category)
    }
}

/// `x-slotboard-uid` header pair.
pub fn uid(n: u64) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-slotboard-uid"),
        HeaderValue::from_str(&n.to_string()).unwrap(),
    )
}

/// `x-slotboard-api-key` header pair.
pub fn api_key(key: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-slotboard-api-key"),
        HeaderValue::from_str(key).unwrap(),
    )
}

/// `x-slotboard-share-key` header pair.
pub fn share_key(secret: &str) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static("x-slotboard-share-key"),
        HeaderValue::from_str(secret).unwrap(),
    )
}

/// Two-slot structure document used across the suites.
pub fn two_slot_structure() -> serde_json::Value {
    serde_json::json!({
        "structure": [
            {
                "kind": "group",
                "name": "Alpha",
                "children": [
                    { "kind": "slot", "id": "a1", "name": "Lead" },
                    { "kind": "slot", "id": "a2", "name": "Medic" }
                ]
            }
        ]
    })
}

/// Create a match via the API as admin `uid(1)` and return its id.
pub async fn create_match(app: &TestApp, tid: u64) -> String {
    app.permissions.allow_edit(UserId(1), TopicId(tid));
    let (name, value) = uid(1);
    let response = app
        .server
        .post(&api(&format!("/{tid}/match")))
        .add_header(name, value)
        .json(&two_slot_structure())
        .await;
    assert_eq!(response.status_code(), axum::http::StatusCode::CREATED);
    response.json::<serde_json::Value>()["id"]
        .as_str()
        .unwrap()
        .to_string()
}
