//! Integration tests for the modal submission branch.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use murmur_integration_tests::{
    CONFESSIONS_CHANNEL, RecordingGateway, StaticStore, body_json, confession,
    interaction_request, test_app,
};

fn reply_submission(user: &str, callback_id: &str, text: &str) -> serde_json::Value {
    json!({
        "type": "view_submission",
        "user": { "id": user },
        "view": {
            "callback_id": callback_id,
            "state": {
                "values": {
                    "reply": {
                        "confession_reply": { "type": "plain_text_input", "value": text }
                    }
                }
            }
        }
    })
}

fn react_submission(user: &str, callback_id: &str, emoji: &str) -> serde_json::Value {
    json!({
        "type": "view_submission",
        "user": { "id": user },
        "view": {
            "callback_id": callback_id,
            "state": {
                "values": {
                    "emoji": {
                        "emoji": {
                            "type": "external_select",
                            "selected_option": { "value": emoji }
                        }
                    }
                }
            }
        }
    })
}

#[tokio::test]
async fn test_reply_submission_posts_threaded_reply() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::with_records(vec![confession(
        7,
        "U1",
        Some("999"),
        None,
    )]));
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&reply_submission(
            "U1",
            "reply_modal_999",
            "me too, honestly",
        )))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let posted = gateway.posted.lock().expect("lock");
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].channel, CONFESSIONS_CHANNEL);
    assert_eq!(posted[0].text, "me too, honestly");
    assert_eq!(posted[0].thread_ts.as_deref(), Some("999"));
}

#[tokio::test]
async fn test_reply_submission_by_non_owner_updates_modal_in_place() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::with_records(vec![confession(
        7,
        "U1",
        Some("999"),
        None,
    )]));
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&reply_submission(
            "U2",
            "reply_modal_999",
            "trying to impersonate",
        )))
        .await
        .expect("response");

    // The rejection is rendered inside the modal, not as an HTTP failure
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["response_action"], "update");
    assert_eq!(body["view"]["callback_id"], "reply_modal_999");

    let blocks = body["view"]["blocks"].as_array().expect("blocks");
    let last = blocks.last().expect("appended error block");
    assert_eq!(last["type"], "section");
    assert!(
        last["text"]["text"]
            .as_str()
            .expect("text")
            .contains("Failed to reply")
    );

    // And nothing was posted
    assert!(gateway.posted.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_reply_submission_fails_when_lookup_is_ambiguous() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::with_records(vec![
        confession(7, "U1", Some("999"), None),
        confession(8, "U1", Some("999"), None),
    ]));
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&reply_submission(
            "U1",
            "reply_modal_999",
            "text",
        )))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(gateway.posted.lock().expect("lock").is_empty());
    // Unlike shortcut failures, submission failures send no notification
    assert!(gateway.responses.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_react_submission_adds_reaction_with_colons_stripped() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::with_records(vec![confession(
        7,
        "U1",
        Some("100.00"),
        None,
    )]));
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&react_submission(
            "U1",
            "react_modal_100.00_200.00",
            ":tada:",
        )))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let reactions = gateway.reactions.lock().expect("lock");
    assert_eq!(reactions.len(), 1);
    assert_eq!(reactions[0].channel, CONFESSIONS_CHANNEL);
    // The reaction lands on the clicked message, not the thread root
    assert_eq!(reactions[0].ts, "200.00");
    assert_eq!(reactions[0].name, "tada");
}

#[tokio::test]
async fn test_react_submission_by_non_owner_updates_modal_in_place() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::with_records(vec![confession(
        7,
        "U1",
        Some("100.00"),
        None,
    )]));
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&react_submission(
            "U2",
            "react_modal_100.00_200.00",
            ":tada:",
        )))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["response_action"], "update");

    let blocks = body["view"]["blocks"].as_array().expect("blocks");
    let last = blocks.last().expect("appended error block");
    assert!(
        last["text"]["text"]
            .as_str()
            .expect("text")
            .contains("Failed to react")
    );

    assert!(gateway.reactions.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_unrecognized_callback_id_is_terminal() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::with_records(vec![confession(
        7,
        "U1",
        Some("999"),
        None,
    )]));
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&reply_submission(
            "U1",
            "settings_modal_999",
            "text",
        )))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(store.queries.lock().expect("lock").is_empty());
    assert!(gateway.posted.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_truncated_callback_id_is_terminal() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::default());
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&reply_submission(
            "U1",
            "reply_modal_",
            "text",
        )))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(store.queries.lock().expect("lock").is_empty());
}
