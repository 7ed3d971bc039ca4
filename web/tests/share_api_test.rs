//! Share-token lifecycle and tokenized write access over the real router.

mod common;

use axum::http::StatusCode;
use common::{api, create_match, event_topic, share_key, spawn_default, uid};

/// Mint a token for a match as admin `uid(1)`; returns `(id, secret)`.
async fn mint_token(app: &common::TestApp, tid: u64, match_id: &str) -> (String, String) {
    let (name, value) = uid(1);
    let response = app
        .server
        .post(&api(&format!("/{tid}/match/{match_id}/share")))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<serde_json::Value>();
    (
        body["id"].as_str().unwrap().to_string(),
        body["secret"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn token_lifecycle_create_list_get_delete() {
    let app = spawn_default();
    app.topics.insert(event_topic(5, 2));
    let match_id = create_match(&app, 5).await;
    let (token_id, secret) = mint_token(&app, 5, &match_id).await;

    // Listing requires admin.
    let (name, value) = uid(7);
    let response = app
        .server
        .get(&api(&format!("/5/match/{match_id}/share")))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    let (name, value) = uid(1);
    let response = app
        .server
        .get(&api(&format!("/5/match/{match_id}/share")))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["total"], 1);
    assert_eq!(body["tokens"][0]["secret"], secret.as_str());

    // The single-token read needs no credentials at all — the share URL
    // is the capability.
    let response = app
        .server
        .get(&api(&format!("/5/match/{match_id}/share/{token_id}")))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(
        response.json::<serde_json::Value>()["secret"],
        secret.as_str()
    );

    // Revoke everything for the match.
    let (name, value) = uid(1);
    let response = app
        .server
        .delete(&api(&format!("/5/match/{match_id}/share")))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .get(&api(&format!("/5/match/{match_id}/share/{token_id}")))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn share_key_grants_writes_on_its_match_only() {
    let app = spawn_default();
    app.topics.insert(event_topic(5, 2));
    let first = create_match(&app, 5).await;
    let second = create_match(&app, 5).await;
    let (_, secret) = mint_token(&app, 5, &first).await;

    // Claim a slot on the token's match, logged out, naming the user.
    let (name, value) = share_key(&secret);
    let response = app
        .server
        .put(&api(&format!("/5/match/{first}/slot/a1/user")))
        .add_header(name, value)
        .json(&serde_json::json!({ "user_id": 42 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // The same secret is refused on the sibling match.
    let (name, value) = share_key(&secret);
    let response = app
        .server
        .put(&api(&format!("/5/match/{second}/slot/a1/user")))
        .add_header(name, value)
        .json(&serde_json::json!({ "user_id": 42 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);

    // A bogus secret is refused everywhere.
    let (name, value) = share_key("bogus");
    let response = app
        .server
        .put(&api(&format!("/5/match/{first}/slot/a2/user")))
        .add_header(name, value)
        .json(&serde_json::json!({ "user_id": 42 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn share_key_holder_can_release_any_occupant_of_their_match() {
    let app = spawn_default();
    app.topics.insert(event_topic(5, 2));
    let match_id = create_match(&app, 5).await;
    let (_, secret) = mint_token(&app, 5, &match_id).await;

    let (name, value) = uid(7);
    app.server
        .put(&api(&format!("/5/match/{match_id}/slot/a1/user")))
        .add_header(name, value)
        .json(&serde_json::json!({}))
        .await;

    let (name, value) = share_key(&secret);
    let response = app
        .server
        .delete(&api(&format!("/5/match/{match_id}/slot/a1/user")))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn share_key_without_target_user_is_bad_request() {
    let app = spawn_default();
    app.topics.insert(event_topic(5, 2));
    let match_id = create_match(&app, 5).await;
    let (_, secret) = mint_token(&app, 5, &match_id).await;

    let (name, value) = share_key(&secret);
    let response = app
        .server
        .put(&api(&format!("/5/match/{match_id}/slot/a1/user")))
        .add_header(name, value)
        .json(&serde_json::json!({}))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_a_match_revokes_its_tokens() {
    let app = spawn_default();
    app.topics.insert(event_topic(5, 2));
    let match_id = create_match(&app, 5).await;
    let (token_id, secret) = mint_token(&app, 5, &match_id).await;

    let (name, value) = uid(1);
    let response = app
        .server
        .delete(&api(&format!("/5/match/{match_id}")))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // The token is gone with the match.
    let response = app
        .server
        .get(&api(&format!("/5/match/{match_id}/share/{token_id}")))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    // And its secret no longer opens anything.
    let (name, value) = share_key(&secret);
    let response = app
        .server
        .put(&api(&format!("/5/match/{match_id}/slot/a1/user")))
        .add_header(name, value)
        .json(&serde_json::json!({ "user_id": 42 }))
        .await;
    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn tokens_for_missing_matches_are_refused() {
    let app = spawn_default();
    app.topics.insert(event_topic(5, 2));
    // Valid admin, nonexistent match.
    app.permissions
        .allow_edit(slotboard_core::UserId(1), slotboard_core::TopicId(5));

    let ghost = uuid::Uuid::new_v4();
    let (name, value) = uid(1);
    let response = app
        .server
        .post(&api(&format!("/5/match/{ghost}/share")))
        .add_header(name, value)
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}
