use crate::signaling::DeliveryError;
use async_trait::async_trait;
use beacon_core::{ConnectionId, SignalMessage};

/// Lookup capability the transport layer hands to the relay: resolves a
/// connection id to its live channel and pushes one message down it.
#[async_trait]
pub trait SignalingOutput: Send + Sync {
    async fn deliver(
        &self,
        to: &ConnectionId,
        message: &SignalMessage,
    ) -> Result<(), DeliveryError>;
}
