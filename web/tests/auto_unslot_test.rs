//! Auto-unslot behavior against state populated through the API.
//!
//! The service is invoked out-of-band (not via HTTP), so these tests
//! drive it directly on the same store the router mutates.

mod common;

use axum::http::StatusCode;
use common::{api, create_match, event_topic, spawn_default, uid};
use slotboard_core::{AttendanceChange, TopicId, UserId};
use slotboard_roster::mocks::MockNotificationSink;
use slotboard_roster::AutoUnslotService;

async fn claim(app: &common::TestApp, user: u64, match_id: &str, slot: &str) {
    let (name, value) = uid(user);
    let response = app
        .server
        .put(&api(&format!("/5/match/{match_id}/slot/{slot}/user")))
        .add_header(name, value)
        .json(&serde_json::json!({}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn attendance_drop_unslots_everywhere_and_notifies_once() {
    let app = spawn_default();
    app.topics.insert(event_topic(5, 2));
    let first = create_match(&app, 5).await;
    let second = create_match(&app, 5).await;

    claim(&app, 7, &first, "a1").await;
    claim(&app, 7, &second, "a2").await;
    claim(&app, 9, &second, "a1").await;

    let sink = MockNotificationSink::new();
    let service = AutoUnslotService::new(app.state.matches.clone(), sink.clone());

    let outcome = service
        .handle(&AttendanceChange {
            topic_id: TopicId(5),
            user_id: UserId(7),
            probability: 0.3,
        })
        .await
        .unwrap();
    assert_eq!(outcome.removed_count(), 2);
    assert!(outcome.notified);
    assert_eq!(sink.sent().len(), 1);
    assert_eq!(sink.sent()[0].removed_count, 2);

    // Only user 9 remains slotted, as the API reports.
    let (name, value) = uid(2);
    let response = app
        .server
        .get(&api("/5/slotted-user-ids"))
        .add_header(name, value)
        .await;
    assert_eq!(
        response.json::<serde_json::Value>()["user_ids"],
        serde_json::json!([9])
    );
}

#[tokio::test]
async fn certain_attendance_changes_nothing() {
    let app = spawn_default();
    app.topics.insert(event_topic(5, 2));
    let match_id = create_match(&app, 5).await;
    claim(&app, 7, &match_id, "a1").await;

    let sink = MockNotificationSink::new();
    let service = AutoUnslotService::new(app.state.matches.clone(), sink.clone());

    let outcome = service
        .handle(&AttendanceChange {
            topic_id: TopicId(5),
            user_id: UserId(7),
            probability: 1.0,
        })
        .await
        .unwrap();
    assert_eq!(outcome.removed_count(), 0);
    assert!(sink.sent().is_empty());

    let (name, value) = uid(2);
    let response = app
        .server
        .get(&api("/5/slotted-user-ids"))
        .add_header(name, value)
        .await;
    assert_eq!(
        response.json::<serde_json::Value>()["user_ids"],
        serde_json::json!([7])
    );
}
