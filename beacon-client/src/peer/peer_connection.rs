use crate::error::NegotiationError;
use crate::peer::PeerEventSender;
use async_trait::async_trait;
use beacon_core::{IceCandidate, SessionDescription};
use std::sync::Arc;

/// The underlying peer-connection object a negotiation session drives.
#[async_trait]
pub trait PeerConnection: Send + Sync {
    async fn set_remote_description(
        &self,
        offer: SessionDescription,
    ) -> Result<(), NegotiationError>;

    async fn create_answer(&self) -> Result<SessionDescription, NegotiationError>;

    async fn set_local_description(
        &self,
        answer: SessionDescription,
    ) -> Result<(), NegotiationError>;

    /// Fails when no remote description has been applied yet.
    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), NegotiationError>;

    async fn close(&self) -> Result<(), NegotiationError>;
}

/// Builds a fresh peer connection whose callbacks report through `events`.
#[async_trait]
pub trait PeerConnectionFactory: Send + Sync {
    async fn create(
        &self,
        events: PeerEventSender,
    ) -> Result<Arc<dyn PeerConnection>, NegotiationError>;
}
