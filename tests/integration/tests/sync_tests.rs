//! Sync endpoint integration tests
//!
//! Each test spawns its own server on an ephemeral port with a fresh
//! in-memory store.
//!
//! Run with: cargo test -p integration-tests --test sync_tests

use std::time::Duration;

use chat_core::Clock;
use chat_service::dto::{HealthResponse, MessageResponse, ReadinessResponse, TypingAck};
use integration_tests::{
    assert_json, assert_status, fixtures::*, manual_clock, TestServer,
};
use reqwest::StatusCode;
use serde_json::json;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    let health: HealthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(health.status, "healthy");
}

#[tokio::test]
async fn test_health_ready_reports_store_counts() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.pull("alice", 0).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    let ready: ReadinessResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(ready.checks.online_users, 1);
    assert_eq!(ready.checks.messages, 1);
}

// ============================================================================
// Pull / Push Tests
// ============================================================================

#[tokio::test]
async fn test_two_participants_see_the_same_log() {
    let server = TestServer::start().await.expect("Failed to start server");

    let first = server.pull("A", 0).await.unwrap();
    assert_eq!(first.messages.len(), 1);
    assert_eq!(first.messages[0].kind, "join");
    assert_eq!(first.messages[0].sender, "A");
    assert_eq!(first.users.len(), 1);
    assert_eq!(first.users[0].username, "A");
    assert!(first.typing_users.is_empty());

    let response = server
        .post("/chat", &json!({ "content": "hi", "sender": "A" }))
        .await
        .unwrap();
    let echoed: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(echoed.content, "hi");
    assert_eq!(echoed.sender, "A");
    assert_eq!(echoed.kind, "message");
    assert!(!echoed.id.is_empty());

    let second = server.pull("B", 0).await.unwrap();
    let log: Vec<(&str, &str)> = second
        .messages
        .iter()
        .map(|m| (m.kind.as_str(), m.sender.as_str()))
        .collect();
    assert_eq!(log, vec![("join", "A"), ("message", "A"), ("join", "B")]);
    assert_eq!(second.messages[1].id, echoed.id);
    assert_eq!(second.users.len(), 2);
}

#[tokio::test]
async fn test_since_is_strictly_exclusive() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.pull("alice", 0).await.unwrap();

    let response = server.post("/chat", &chat_request("alice", "one")).await.unwrap();
    let sent: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();

    let at = server.pull("alice", sent.timestamp).await.unwrap();
    assert!(at.messages.iter().all(|m| m.id != sent.id));

    let before = server.pull("alice", sent.timestamp - 1).await.unwrap();
    assert!(before.messages.iter().any(|m| m.id == sent.id));
}

#[tokio::test]
async fn test_cursor_chain_delivers_each_message_once() {
    let server = TestServer::start().await.expect("Failed to start server");
    let reader = unique_username("reader");
    let writer = unique_username("writer");

    let mut cursor = server.pull(&reader, 0).await.unwrap().timestamp;
    let mut seen = Vec::new();

    for round in 0..5 {
        for n in 0..3 {
            let body = chat_request(&writer, &format!("round {round} msg {n}"));
            assert_status(server.post("/chat", &body).await.unwrap(), StatusCode::OK)
                .await
                .unwrap();
        }
        let snapshot = server.pull(&reader, cursor).await.unwrap();
        assert!(snapshot.timestamp > cursor);
        cursor = snapshot.timestamp;
        seen.extend(
            snapshot
                .messages
                .into_iter()
                .filter(|m| m.kind == "message")
                .map(|m| m.content),
        );
    }

    assert_eq!(seen.len(), 15);
    assert_eq!(seen[0], "round 0 msg 0");
    assert_eq!(seen[14], "round 4 msg 2");

    let idle = server.pull(&reader, cursor).await.unwrap();
    assert!(idle.messages.is_empty());
}

#[tokio::test]
async fn test_repeated_id_is_stored_once() {
    let server = TestServer::start().await.expect("Failed to start server");
    let body = chat_request_with_id("retry-1", "alice", "hello");

    let first: MessageResponse =
        assert_json(server.post("/chat", &body).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    let second: MessageResponse =
        assert_json(server.post("/chat", &body).await.unwrap(), StatusCode::OK)
            .await
            .unwrap();
    assert_eq!(first, second);

    let log = server.pull("bob", 0).await.unwrap();
    let copies = log.messages.iter().filter(|m| m.id == "retry-1").count();
    assert_eq!(copies, 1);
}

#[tokio::test]
async fn test_typing_round_trip() {
    let server = TestServer::start().await.expect("Failed to start server");
    server.pull("alice", 0).await.unwrap();

    let response = server
        .post("/chat", &typing_request("alice", true))
        .await
        .unwrap();
    let ack: TypingAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.success);

    let seen = server.pull("bob", 0).await.unwrap();
    assert_eq!(seen.typing_users, vec!["alice".to_string()]);
    let alice = seen.users.iter().find(|u| u.username == "alice").unwrap();
    assert!(alice.is_typing);

    server
        .post("/chat", &typing_request("alice", false))
        .await
        .unwrap();
    let cleared = server.pull("bob", seen.timestamp).await.unwrap();
    assert!(cleared.typing_users.is_empty());
}

#[tokio::test]
async fn test_typing_for_unknown_user_is_ignored() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/chat", &typing_request("ghost", true))
        .await
        .unwrap();
    let ack: TypingAck = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ack.success);

    let seen = server.pull("bob", 0).await.unwrap();
    assert!(seen.typing_users.is_empty());
    assert!(seen.users.iter().all(|u| u.username != "ghost"));
}

// ============================================================================
// Error Tests
// ============================================================================

#[tokio::test]
async fn test_pull_without_username_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    for path in ["/chat", "/chat?since=0", "/chat?username=%20%20"] {
        let response = server.get(path).await.unwrap();
        let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
            .await
            .unwrap();
        assert_eq!(body.error.code, "INVALID_REQUEST", "path {path}");
    }
}

#[tokio::test]
async fn test_pull_with_bad_cursor_is_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server.get("/chat?username=alice&since=yesterday").await.unwrap();
    let body: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(body.error.code, "INVALID_REQUEST");
}

#[tokio::test]
async fn test_malformed_pushes_are_rejected() {
    let server = TestServer::start().await.expect("Failed to start server");

    let bodies = [
        json!({ "sender": "alice" }),
        json!({ "content": "hi" }),
        json!({ "content": "   ", "sender": "alice" }),
        json!({ "content": "x".repeat(501), "sender": "alice" }),
        json!({ "type": "reaction", "content": "hi", "sender": "alice" }),
        json!({ "type": "typing", "sender": "alice" }),
        json!({ "id": "", "content": "hi", "sender": "alice" }),
    ];

    for body in &bodies {
        let response = server.post("/chat", body).await.unwrap();
        let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST)
            .await
            .unwrap();
        assert_eq!(error.error.code, "MALFORMED_PAYLOAD", "body {body}");
        assert!(!error.error.message.is_empty());
    }

    let response = server.post_raw("/chat", "{not json").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::INTERNAL_SERVER_ERROR)
        .await
        .unwrap();
    assert_eq!(error.error.code, "INTERNAL_ERROR");

    let log = server.pull("observer", 0).await.unwrap();
    assert!(log.messages.iter().all(|m| m.kind != "message"));
}

#[tokio::test]
async fn test_content_is_trimmed() {
    let server = TestServer::start().await.expect("Failed to start server");

    let response = server
        .post("/chat", &chat_request("  alice  ", "  hello there  "))
        .await
        .unwrap();
    let echoed: MessageResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(echoed.content, "hello there");
    assert_eq!(echoed.sender, "alice");
}

// ============================================================================
// Presence Timeout Tests
// ============================================================================

#[tokio::test]
async fn test_stale_users_are_evicted_with_leave_message() {
    let clock = manual_clock();
    let server = TestServer::start_with_clock(clock.clone())
        .await
        .expect("Failed to start server");
    let start = clock.now().as_millis();

    server.pull("alice", 0).await.unwrap();
    clock.advance(Duration::from_secs(30));
    server.pull("bob", 0).await.unwrap();
    server.post("/chat", &typing_request("bob", true)).await.unwrap();

    clock.advance(Duration::from_secs(31));
    let evicted = server.state.reaper().sweep();
    assert_eq!(evicted.len(), 1);
    assert_eq!(evicted[0].sender, "alice");

    let seen = server.pull("carol", start).await.unwrap();
    assert!(seen.users.iter().all(|u| u.username != "alice"));
    let leave = seen
        .messages
        .iter()
        .find(|m| m.kind == "leave")
        .expect("leave message");
    assert_eq!(leave.sender, "alice");
    assert_eq!(seen.typing_users, vec!["bob".to_string()]);

    clock.advance(Duration::from_secs(61));
    let evicted = server.state.reaper().sweep();
    let mut gone: Vec<String> = evicted.into_iter().map(|m| m.sender).collect();
    gone.sort();
    assert_eq!(gone, vec!["bob".to_string(), "carol".to_string()]);

    let after = server.pull("dave", 0).await.unwrap();
    assert!(after.typing_users.is_empty());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
