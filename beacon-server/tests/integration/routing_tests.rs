use beacon_core::{ConnectionId, IceCandidate, Role, SessionDescription, SignalMessage};
use beacon_server::{DeliveryReport, RelayCommand, RoutingError, SignalingRouter, destination_role};
use std::sync::Arc;

use crate::integration::{create_test_relay, init_tracing, register};
use crate::utils::MockSignalingOutput;

fn offer(sdp: &str) -> SignalMessage {
    SignalMessage::Offer {
        offer: SessionDescription::offer(sdp),
    }
}

fn ice(candidate: &str) -> SignalMessage {
    SignalMessage::IceCandidate {
        candidate: IceCandidate::new(candidate),
    }
}

#[tokio::test]
async fn test_offer_reaches_all_consumers_and_no_producer() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let producer = register(&mut relay, Role::Producer).await;
    let other_producer = register(&mut relay, Role::Producer).await;
    let c1 = register(&mut relay, Role::Consumer).await;
    let c2 = register(&mut relay, Role::Consumer).await;
    output.clear().await;

    relay
        .handle_command(RelayCommand::Signal {
            id: producer,
            message: offer("X"),
        })
        .await;

    assert_eq!(output.deliveries_to(&c1).await, vec![offer("X")]);
    assert_eq!(output.deliveries_to(&c2).await, vec![offer("X")]);
    assert!(output.deliveries_to(&producer).await.is_empty());
    assert!(output.deliveries_to(&other_producer).await.is_empty());
    assert_eq!(output.all().await.len(), 2);
}

#[tokio::test]
async fn test_consumer_candidate_goes_only_to_producers() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let p1 = register(&mut relay, Role::Producer).await;
    let p2 = register(&mut relay, Role::Producer).await;
    let c1 = register(&mut relay, Role::Consumer).await;
    let c2 = register(&mut relay, Role::Consumer).await;
    output.clear().await;

    relay
        .handle_command(RelayCommand::Signal {
            id: c1,
            message: ice("foo"),
        })
        .await;

    assert_eq!(output.deliveries_to(&p1).await, vec![ice("foo")]);
    assert_eq!(output.deliveries_to(&p2).await, vec![ice("foo")]);
    assert!(output.deliveries_to(&c1).await.is_empty());
    assert!(output.deliveries_to(&c2).await.is_empty());
}

#[tokio::test]
async fn test_producer_candidate_goes_to_consumers() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let producer = register(&mut relay, Role::Producer).await;
    let consumer = register(&mut relay, Role::Consumer).await;
    output.clear().await;

    relay
        .handle_command(RelayCommand::Signal {
            id: producer,
            message: ice("bar"),
        })
        .await;

    assert_eq!(output.deliveries_to(&consumer).await, vec![ice("bar")]);
    assert_eq!(output.all().await.len(), 1);
}

#[tokio::test]
async fn test_answer_and_stream_request_go_to_producers() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let producer = register(&mut relay, Role::Producer).await;
    let consumer = register(&mut relay, Role::Consumer).await;
    output.clear().await;

    let answer = SignalMessage::Answer {
        answer: SessionDescription::answer("A"),
    };
    relay
        .handle_command(RelayCommand::Signal {
            id: consumer,
            message: SignalMessage::request_stream(),
        })
        .await;
    relay
        .handle_command(RelayCommand::Signal {
            id: consumer,
            message: answer.clone(),
        })
        .await;

    assert_eq!(
        output.deliveries_to(&producer).await,
        vec![SignalMessage::request_stream(), answer]
    );
}

#[tokio::test]
async fn test_out_of_protocol_messages_are_dropped() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let producer = register(&mut relay, Role::Producer).await;
    let consumer = register(&mut relay, Role::Consumer).await;
    output.clear().await;

    let stranger = ConnectionId::new();
    let rejected = vec![
        (stranger, offer("X")),
        (consumer, offer("X")),
        (producer, SignalMessage::request_stream()),
        (
            producer,
            SignalMessage::Answer {
                answer: SessionDescription::answer("A"),
            },
        ),
        (producer, SignalMessage::presence_offline("spoofed")),
    ];

    for (id, message) in rejected {
        relay
            .handle_command(RelayCommand::Signal { id, message })
            .await;
    }

    assert!(output.all().await.is_empty());
}

#[tokio::test]
async fn test_router_reports_rejections() {
    init_tracing();
    let registry = Arc::new(beacon_server::ConnectionRegistry::new());
    let output = MockSignalingOutput::new_stored_only();
    let router = SignalingRouter::new(registry.clone(), Arc::new(output));

    let consumer = ConnectionId::new();
    let stranger = ConnectionId::new();
    registry.register(consumer, Role::Consumer).unwrap();

    assert_eq!(
        router.route(&stranger, &ice("x")).await,
        Err(RoutingError::UnknownSender(stranger))
    );
    assert_eq!(
        router.route(&consumer, &offer("X")).await,
        Err(RoutingError::Unroutable {
            role: Role::Consumer,
            kind: beacon_core::MessageKind::Offer,
        })
    );
    assert_eq!(
        router.route(&consumer, &ice("x")).await,
        Ok(DeliveryReport::default())
    );
}

#[tokio::test]
async fn test_failed_delivery_does_not_abort_broadcast() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let producer = register(&mut relay, Role::Producer).await;
    let closing = register(&mut relay, Role::Consumer).await;
    let healthy = register(&mut relay, Role::Consumer).await;
    output.clear().await;
    output.close(closing).await;

    relay
        .handle_command(RelayCommand::Signal {
            id: producer,
            message: offer("X"),
        })
        .await;

    assert!(output.deliveries_to(&closing).await.is_empty());
    assert_eq!(output.deliveries_to(&healthy).await, vec![offer("X")]);
}

#[tokio::test]
async fn test_late_consumer_never_sees_earlier_offer() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let producer = register(&mut relay, Role::Producer).await;
    relay
        .handle_command(RelayCommand::Signal {
            id: producer,
            message: offer("X"),
        })
        .await;

    let late = register(&mut relay, Role::Consumer).await;

    assert!(output.deliveries_to(&late).await.is_empty());
}

#[test]
fn test_direction_table() {
    use beacon_core::MessageKind as K;

    assert_eq!(destination_role(Role::Producer, K::Offer), Some(Role::Consumer));
    assert_eq!(destination_role(Role::Consumer, K::Answer), Some(Role::Producer));
    assert_eq!(destination_role(Role::Producer, K::IceCandidate), Some(Role::Consumer));
    assert_eq!(destination_role(Role::Consumer, K::IceCandidate), Some(Role::Producer));
    assert_eq!(destination_role(Role::Consumer, K::RequestStream), Some(Role::Producer));
    assert_eq!(destination_role(Role::Consumer, K::Offer), None);
    assert_eq!(destination_role(Role::Producer, K::Answer), None);
    assert_eq!(destination_role(Role::Producer, K::Register), None);
    assert_eq!(destination_role(Role::Consumer, K::PresenceOnline), None);
}
