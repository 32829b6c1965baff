pub mod actor_tests;

use beacon_client::{ConsumerEngine, ConsumerHandle, StatusUpdate};
use beacon_core::{SessionDescription, SignalMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::Level;

use crate::utils::MockPeerFactory;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Engine driven step by step, with both of its output channels exposed.
pub struct TestConsumer {
    pub engine: ConsumerEngine,
    pub handle: ConsumerHandle,
    pub factory: MockPeerFactory,
    pub signals: mpsc::UnboundedReceiver<SignalMessage>,
    pub statuses: mpsc::UnboundedReceiver<StatusUpdate>,
}

pub fn create_test_consumer() -> TestConsumer {
    let factory = MockPeerFactory::new();
    let (signal_tx, signals) = mpsc::unbounded_channel();
    let (status_tx, statuses) = mpsc::unbounded_channel();
    let (engine, handle) = ConsumerEngine::new(Arc::new(factory.clone()), signal_tx, status_tx);

    TestConsumer {
        engine,
        handle,
        factory,
        signals,
        statuses,
    }
}

pub fn offer() -> SignalMessage {
    SignalMessage::Offer {
        offer: SessionDescription::offer("v=0 producer-offer"),
    }
}

impl TestConsumer {
    pub fn drain_signals(&mut self) -> Vec<SignalMessage> {
        let mut out = Vec::new();
        while let Ok(msg) = self.signals.try_recv() {
            out.push(msg);
        }
        out
    }

    pub fn drain_statuses(&mut self) -> Vec<StatusUpdate> {
        let mut out = Vec::new();
        while let Ok(update) = self.statuses.try_recv() {
            out.push(update);
        }
        out
    }

    /// Connects and answers an offer, leaving the engine in `Negotiating`
    /// with both channels drained.
    pub async fn negotiate(&mut self) {
        self.engine.connect().await;
        self.engine.handle_signal(offer()).await;
        self.drain_signals();
        self.drain_statuses();
    }
}
