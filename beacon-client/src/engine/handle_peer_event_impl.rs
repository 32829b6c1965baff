use crate::engine::{ConsumerEngine, NegotiationState};
use crate::peer::{PeerConnectionState, PeerEvent, PeerEventKind};
use beacon_core::{IceCandidate, SignalMessage};
use tracing::debug;

impl ConsumerEngine {
    pub(crate) fn handle_peer_event(&mut self, event: PeerEvent) {
        if !self
            .session
            .as_ref()
            .is_some_and(|s| s.id == event.session)
        {
            debug!("Dropping event from stale session {}", event.session);
            return;
        }

        match event.kind {
            PeerEventKind::LocalCandidate(candidate) => self.handle_local_candidate(candidate),
            PeerEventKind::ConnectionState(state) => self.handle_connection_state(state),
            PeerEventKind::Track {
                stream_id,
                track_id,
                kind,
            } => {
                if let Some(session) = self.session.as_mut() {
                    session.attach_track(stream_id, track_id, kind);
                }
                self.publish("Stream connected!");
            }
        }
    }

    fn handle_local_candidate(&mut self, candidate: IceCandidate) {
        if self.state.holds_local_candidates() {
            if let Some(session) = self.session.as_mut() {
                session.pending_candidates.push(candidate);
            }
        } else {
            self.emit(SignalMessage::IceCandidate { candidate });
            debug!("Sent ICE candidate");
        }
    }

    fn handle_connection_state(&mut self, state: PeerConnectionState) {
        match (state, self.state) {
            // ICE may recover from a transient disconnect.
            (
                PeerConnectionState::Connected,
                NegotiationState::Negotiating | NegotiationState::Failed,
            ) => {
                self.transition(NegotiationState::Connected, "Stream active");
            }
            (
                PeerConnectionState::Disconnected | PeerConnectionState::Failed,
                NegotiationState::Negotiating | NegotiationState::Connected,
            ) => {
                self.transition(NegotiationState::Failed, "Stream disconnected");
            }
            (s, current) => debug!("Connection state {:?} while {}", s, current),
        }
    }
}
