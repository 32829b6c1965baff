use crate::peer::RemoteMedia;
use std::fmt;

/// Where a consumer's negotiation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationState {
    Idle,
    Requesting,
    OfferReceived,
    Answering,
    Negotiating,
    Connected,
    Disconnected,
    Failed,
}

impl NegotiationState {
    /// A negotiation is in progress or established.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            NegotiationState::Requesting
                | NegotiationState::OfferReceived
                | NegotiationState::Answering
                | NegotiationState::Negotiating
                | NegotiationState::Connected
        )
    }

    /// The answer is not in place yet, so local candidates must wait.
    pub fn holds_local_candidates(self) -> bool {
        matches!(
            self,
            NegotiationState::Requesting
                | NegotiationState::OfferReceived
                | NegotiationState::Answering
        )
    }
}

impl fmt::Display for NegotiationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Online,
    Offline,
    Connecting,
}

/// The one notification a UI needs to render the consumer.
///
/// Everything except `message` is derived from engine state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub state: NegotiationState,
    pub message: String,
    pub tone: StatusTone,
    pub producer_online: bool,
    pub remote_media: Option<RemoteMedia>,
    pub can_connect: bool,
    pub can_disconnect: bool,
}

impl StatusUpdate {
    pub fn project(
        state: NegotiationState,
        has_session: bool,
        producer_online: bool,
        remote_media: Option<RemoteMedia>,
        message: String,
    ) -> Self {
        let tone = match state {
            NegotiationState::Connected => StatusTone::Online,
            s if s.is_active() => StatusTone::Connecting,
            NegotiationState::Failed => StatusTone::Offline,
            _ if producer_online => StatusTone::Online,
            _ => StatusTone::Offline,
        };

        Self {
            state,
            message,
            tone,
            producer_online,
            remote_media,
            can_connect: !state.is_active(),
            can_disconnect: has_session,
        }
    }
}
