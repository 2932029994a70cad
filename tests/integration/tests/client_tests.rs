//! Client engine against a live server
//!
//! Run with: cargo test -p integration-tests --test client_tests

use std::sync::Arc;
use std::time::Duration;

use chat_client::{
    ClientEvent, ConnectionState, DeliveryStatus, HttpTransport, SyncClient, Transport,
};
use chat_core::MessageKind;
use integration_tests::{fixtures::*, wait_for_event, TestServer};

const WAIT: Duration = Duration::from_secs(5);

fn transport_for(server: &TestServer) -> Arc<dyn Transport> {
    let config = fast_sync_config();
    Arc::new(HttpTransport::from_config(&server.base_url(), &config).expect("Failed to build transport"))
}

#[tokio::test]
async fn test_message_reaches_other_client() {
    let server = TestServer::start().await.expect("Failed to start server");
    let alice = unique_username("alice");
    let bob = unique_username("bob");

    let (alice_client, mut alice_events) = SyncClient::new(transport_for(&server), fast_sync_config());
    let (bob_client, mut bob_events) = SyncClient::new(transport_for(&server), fast_sync_config());

    alice_client.connect(&alice);
    bob_client.connect(&bob);
    wait_for_event(&mut alice_events, WAIT, |e| {
        matches!(e, ClientEvent::ConnectionChanged(true))
    })
    .await
    .unwrap();
    wait_for_event(&mut bob_events, WAIT, |e| {
        matches!(e, ClientEvent::ConnectionChanged(true))
    })
    .await
    .unwrap();

    let mut pending = alice_client.send_message("hello bob", &alice);
    assert_eq!(pending.outcome().await, DeliveryStatus::Sent);

    let event = wait_for_event(&mut bob_events, WAIT, |e| {
        matches!(e, ClientEvent::Message(m) if m.kind == MessageKind::Message)
    })
    .await
    .unwrap();
    let ClientEvent::Message(message) = event else {
        unreachable!("predicate only matches messages");
    };
    assert_eq!(message.id, *pending.id());
    assert_eq!(message.content, "hello bob");
    assert_eq!(message.sender, alice);

    // The sender sees its own message through polling as well.
    wait_for_event(&mut alice_events, WAIT, |e| {
        matches!(e, ClientEvent::Message(m) if m.id == *pending.id())
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_presence_and_typing_views() {
    let server = TestServer::start().await.expect("Failed to start server");
    let alice = unique_username("alice");
    let bob = unique_username("bob");

    let (alice_client, _alice_events) = SyncClient::new(transport_for(&server), fast_sync_config());
    let (bob_client, mut bob_events) = SyncClient::new(transport_for(&server), fast_sync_config());

    alice_client.connect(&alice);
    bob_client.connect(&bob);

    let expected = alice.clone();
    wait_for_event(&mut bob_events, WAIT, |e| {
        matches!(e, ClientEvent::UsersChanged(users) if users.iter().any(|u| u.username == expected))
    })
    .await
    .unwrap();

    alice_client.start_typing(&alice);
    let expected = alice.clone();
    wait_for_event(&mut bob_events, WAIT, |e| {
        matches!(e, ClientEvent::TypingChanged(names) if names.contains(&expected))
    })
    .await
    .unwrap();

    // Idle timeout clears the flag without another call.
    wait_for_event(&mut bob_events, WAIT, |e| {
        matches!(e, ClientEvent::TypingChanged(names) if names.is_empty())
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn test_server_loss_is_reported() {
    let server = TestServer::start().await.expect("Failed to start server");
    let transport = transport_for(&server);
    let (client, mut events) = SyncClient::new(transport, fast_sync_config());

    client.connect(&unique_username("alice"));
    wait_for_event(&mut events, WAIT, |e| {
        matches!(e, ClientEvent::ConnectionChanged(true))
    })
    .await
    .unwrap();

    drop(server);

    wait_for_event(&mut events, WAIT, |e| {
        matches!(e, ClientEvent::ConnectionChanged(false))
    })
    .await
    .unwrap();
    assert!(matches!(
        client.state(),
        ConnectionState::Disconnected { .. } | ConnectionState::GaveUp
    ));
}
