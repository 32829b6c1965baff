use beacon_client::{NegotiationState, PeerConnectionState, PeerEventKind, StatusUpdate};
use beacon_core::{MessageKind, SignalMessage};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::integration::{create_test_consumer, init_tracing, offer};

async fn next_signal(rx: &mut mpsc::UnboundedReceiver<SignalMessage>) -> SignalMessage {
    timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("engine stalled")
        .expect("signal channel closed")
}

async fn wait_for_state(
    rx: &mut mpsc::UnboundedReceiver<StatusUpdate>,
    state: NegotiationState,
) -> StatusUpdate {
    loop {
        let update = timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("engine stalled")
            .expect("status channel closed");
        if update.state == state {
            return update;
        }
    }
}

#[tokio::test]
async fn test_engine_loop_runs_full_negotiation() {
    init_tracing();
    let t = create_test_consumer();
    let factory = t.factory.clone();
    let handle = t.handle.clone();
    let mut signals = t.signals;
    let mut statuses = t.statuses;
    let engine_task = tokio::spawn(t.engine.run());
    drop(t.handle);

    handle.connect().await.unwrap();
    assert_eq!(next_signal(&mut signals).await, SignalMessage::request_stream());

    handle.signal(offer()).await.unwrap();
    assert_eq!(next_signal(&mut signals).await.kind(), MessageKind::Answer);
    wait_for_state(&mut statuses, NegotiationState::Negotiating).await;

    factory
        .fire(PeerEventKind::ConnectionState(PeerConnectionState::Connected))
        .await;
    let active = wait_for_state(&mut statuses, NegotiationState::Connected).await;
    assert_eq!(active.message, "Stream active");

    drop(handle);
    timeout(Duration::from_secs(2), engine_task)
        .await
        .expect("engine did not stop")
        .unwrap();

    assert_eq!(factory.latest_peer().close_count(), 1);
}

#[tokio::test]
async fn test_blocking_handle_from_plain_thread() {
    init_tracing();
    let t = create_test_consumer();
    let handle = t.handle.clone();
    let mut signals = t.signals;
    tokio::spawn(t.engine.run());

    tokio::task::spawn_blocking(move || {
        handle
            .blocking_send(beacon_client::ConsumerCommand::Connect)
            .unwrap();
    })
    .await
    .unwrap();

    assert_eq!(next_signal(&mut signals).await, SignalMessage::request_stream());
}

#[tokio::test]
async fn test_shutdown_closes_live_peer_while_handles_remain() {
    init_tracing();
    let t = create_test_consumer();
    let factory = t.factory.clone();
    let handle = t.handle.clone();
    let mut signals = t.signals;
    let engine_task = tokio::spawn(t.engine.run());

    handle.connect().await.unwrap();
    assert_eq!(next_signal(&mut signals).await, SignalMessage::request_stream());

    handle
        .send(beacon_client::ConsumerCommand::Shutdown)
        .await
        .unwrap();
    timeout(Duration::from_secs(2), engine_task)
        .await
        .expect("engine did not stop")
        .unwrap();

    assert_eq!(factory.latest_peer().close_count(), 1);
    drop(handle);
}
