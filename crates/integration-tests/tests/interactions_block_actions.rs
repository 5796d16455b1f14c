//! Integration tests for the moderation button branch.
//!
//! A `block_actions` payload carries the moderator's verdict; `approve`
//! publishes the staged confession, `disapprove` leaves the channel alone,
//! anything else is ignored.

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use murmur_integration_tests::{
    CONFESSIONS_CHANNEL, RecordingGateway, StaticStore, confession, forged_request,
    interaction_request, test_app,
};

fn block_actions_payload(values: &[&str]) -> serde_json::Value {
    let actions: Vec<_> = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            json!({
                "block_id": "review",
                "action_id": format!("moderate_{i}"),
                "value": value
            })
        })
        .collect();

    json!({
        "type": "block_actions",
        "trigger_id": "111.222",
        "response_url": "https://hooks.slack.com/actions/T0/1/abc",
        "user": "U0MOD",
        "message": { "type": "message", "text": "staged confession", "ts": "123.45" },
        "actions": actions
    })
}

#[tokio::test]
async fn test_approve_publishes_confession() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::with_records(vec![confession(
        7,
        "U0SUBMITTER",
        None,
        Some("123.45"),
    )]));
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&block_actions_payload(&["approve"])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The staged confession was resolved by the clicked message's timestamp
    let queries = store.queries.lock().expect("lock");
    assert_eq!(queries.as_slice(), ["{staging_ts} = '123.45'"]);

    // ...and published to the confessions channel
    let posted = gateway.posted.lock().expect("lock");
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].channel, CONFESSIONS_CHANNEL);
    assert!(posted[0].text.contains("confession #7"));
    assert_eq!(posted[0].thread_ts, None);
}

#[tokio::test]
async fn test_disapprove_publishes_nothing() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::with_records(vec![confession(
        7,
        "U0SUBMITTER",
        None,
        Some("123.45"),
    )]));
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&block_actions_payload(&["disapprove"])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.queries.lock().expect("lock").len(), 1);
    assert!(gateway.posted.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_unrecognized_value_is_ignored() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::default());
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&block_actions_payload(&["snooze"])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(store.queries.lock().expect("lock").is_empty());
    assert!(gateway.posted.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_empty_actions_are_ignored() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::default());
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&block_actions_payload(&[])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(store.queries.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_only_first_action_is_read() {
    // Policy carried over from the original handler: if Slack ever batches
    // several actions into one payload, entries past the first are dropped
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::with_records(vec![confession(
        7,
        "U0SUBMITTER",
        None,
        Some("123.45"),
    )]));
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&block_actions_payload(&[
            "approve",
            "disapprove",
        ])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(store.queries.lock().expect("lock").len(), 1);
    assert_eq!(gateway.posted.lock().expect("lock").len(), 1);
}

#[tokio::test]
async fn test_ambiguous_record_notifies_and_fails() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::with_records(vec![
        confession(7, "U0SUBMITTER", None, Some("123.45")),
        confession(8, "U0OTHER", None, Some("123.45")),
    ]));
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&block_actions_payload(&["approve"])))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(gateway.posted.lock().expect("lock").is_empty());

    // The moderator was told, best effort, via the response_url
    let responses = gateway.responses.lock().expect("lock");
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0].0, "https://hooks.slack.com/actions/T0/1/abc");
}

#[tokio::test]
async fn test_forged_signature_is_rejected_before_parsing() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::default());
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let body = format!(
        "payload={}",
        urlencoding::encode(&block_actions_payload(&["approve"]).to_string())
    );
    let response = app
        .oneshot(forged_request("/api/slack/interactions", body))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(store.queries.lock().expect("lock").is_empty());
    assert!(gateway.posted.lock().expect("lock").is_empty());
}

#[tokio::test]
async fn test_unknown_interaction_type_is_rejected() {
    let gateway = Arc::new(RecordingGateway::default());
    let store = Arc::new(StaticStore::default());
    let app = test_app(Arc::clone(&gateway), Arc::clone(&store));

    let response = app
        .oneshot(interaction_request(&json!({
            "type": "shortcut",
            "trigger_id": "111.222"
        })))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
