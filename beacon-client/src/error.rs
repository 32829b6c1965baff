use thiserror::Error;

/// Failure of one step of the offer/answer/ICE exchange.
///
/// None of these end the client; they end the current negotiation attempt
/// at most, and nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NegotiationError {
    #[error("failed to create peer connection: {0}")]
    PeerConnection(String),

    #[error("failed to set remote description: {0}")]
    RemoteDescription(String),

    #[error("failed to create answer: {0}")]
    CreateAnswer(String),

    #[error("failed to set local description: {0}")]
    LocalDescription(String),

    #[error("failed to add ICE candidate: {0}")]
    IceCandidate(String),

    #[error("failed to close peer connection: {0}")]
    Close(String),
}
