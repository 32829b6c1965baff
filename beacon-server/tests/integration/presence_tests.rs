use beacon_core::utils::{PRODUCER_OFFLINE_MESSAGE, PRODUCER_ONLINE_MESSAGE};
use beacon_core::{MessageKind, Role, SignalMessage};
use beacon_server::RelayCommand;

use crate::integration::{create_test_relay, init_tracing, register};

#[tokio::test]
async fn test_producer_online_reaches_each_consumer_once() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let earlier_producer = register(&mut relay, Role::Producer).await;
    let c1 = register(&mut relay, Role::Consumer).await;
    let c2 = register(&mut relay, Role::Consumer).await;
    let c3 = register(&mut relay, Role::Consumer).await;
    output.clear().await;

    let producer = register(&mut relay, Role::Producer).await;

    for consumer in [c1, c2, c3] {
        assert_eq!(
            output.deliveries_to(&consumer).await,
            vec![SignalMessage::presence_online(PRODUCER_ONLINE_MESSAGE)]
        );
    }
    assert!(output.deliveries_to(&earlier_producer).await.is_empty());
    assert!(output.deliveries_to(&producer).await.is_empty());
    assert_eq!(output.all().await.len(), 3);
}

#[tokio::test]
async fn test_consumer_join_and_leave_are_silent() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let _producer = register(&mut relay, Role::Producer).await;
    let c1 = register(&mut relay, Role::Consumer).await;
    output.clear().await;

    let c2 = register(&mut relay, Role::Consumer).await;
    relay
        .handle_command(RelayCommand::Disconnect { id: c2 })
        .await;

    assert!(output.all().await.is_empty());
    assert!(relay.registry().role_of(&c1).is_ok());
}

#[tokio::test]
async fn test_sole_producer_disconnect_broadcasts_offline_once() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let producer = register(&mut relay, Role::Producer).await;
    let c1 = register(&mut relay, Role::Consumer).await;
    let c2 = register(&mut relay, Role::Consumer).await;
    output.clear().await;

    relay
        .handle_command(RelayCommand::Disconnect { id: producer })
        .await;
    relay
        .handle_command(RelayCommand::Disconnect { id: producer })
        .await;

    for consumer in [c1, c2] {
        assert_eq!(
            output.deliveries_to(&consumer).await,
            vec![SignalMessage::presence_offline(PRODUCER_OFFLINE_MESSAGE)]
        );
    }
    assert_eq!(relay.registry().count(Role::Producer), 0);
}

#[tokio::test]
async fn test_each_additional_producer_announces_itself() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let consumer = register(&mut relay, Role::Consumer).await;
    register(&mut relay, Role::Producer).await;
    register(&mut relay, Role::Producer).await;

    let received = output.deliveries_to(&consumer).await;
    assert_eq!(received.len(), 2);
    assert!(
        received
            .iter()
            .all(|m| m.kind() == MessageKind::PresenceOnline)
    );
    assert_eq!(relay.registry().count(Role::Producer), 2);
}

#[tokio::test]
async fn test_repeated_register_keeps_role_and_stays_silent() {
    init_tracing();
    let (mut relay, output) = create_test_relay();

    let consumer = register(&mut relay, Role::Consumer).await;
    let producer = register(&mut relay, Role::Producer).await;
    output.clear().await;

    relay
        .handle_command(RelayCommand::Register {
            id: producer,
            role: Role::Producer,
        })
        .await;
    relay
        .handle_command(RelayCommand::Register {
            id: consumer,
            role: Role::Producer,
        })
        .await;

    assert!(output.all().await.is_empty());
    assert_eq!(relay.registry().role_of(&consumer), Ok(Role::Consumer));
    assert_eq!(relay.registry().len(), 2);
}
