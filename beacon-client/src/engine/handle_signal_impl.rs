use crate::engine::{ConsumerEngine, NegotiationState};
use crate::error::NegotiationError;
use beacon_core::{IceCandidate, SessionDescription, SignalMessage};
use tracing::{debug, warn};

impl ConsumerEngine {
    pub async fn handle_signal(&mut self, msg: SignalMessage) {
        match msg {
            SignalMessage::Offer { offer } => self.handle_offer(offer).await,

            SignalMessage::IceCandidate { candidate } => {
                self.handle_remote_candidate(candidate).await
            }

            SignalMessage::PresenceOnline { message } => {
                debug!("Relay says: {}", message);
                self.producer_online = true;
                self.publish("Producer online - ready to connect");
            }

            SignalMessage::PresenceOffline { message } => {
                debug!("Relay says: {}", message);
                self.producer_online = false;
                if self.session.is_some() {
                    self.teardown("Producer went offline").await;
                } else {
                    self.publish("Producer offline");
                }
            }

            other => debug!("Ignoring {} from relay", other.kind()),
        }
    }

    async fn handle_offer(&mut self, offer: SessionDescription) {
        let Some(session) = &self.session else {
            warn!("No peer connection available for offer");
            return;
        };

        if self.state != NegotiationState::Requesting {
            debug!("Ignoring offer while {}", self.state);
            return;
        }

        let peer = session.peer.clone();

        if let Err(e) = peer.set_remote_description(offer).await {
            self.report_offer_error(e);
            return;
        }
        self.transition(NegotiationState::OfferReceived, "Received offer from producer");

        self.transition(NegotiationState::Answering, "Answering offer...");
        let answer = match peer.create_answer().await {
            Ok(answer) => answer,
            Err(e) => {
                self.report_offer_error(e);
                return;
            }
        };
        if let Err(e) = peer.set_local_description(answer.clone()).await {
            self.report_offer_error(e);
            return;
        }

        self.emit(SignalMessage::Answer { answer });
        self.transition(NegotiationState::Negotiating, "Sent answer to producer");
        self.flush_pending_candidates();
    }

    /// Candidates that arrive before the offer are rejected by the peer
    /// connection and dropped here; they are not queued for later.
    async fn handle_remote_candidate(&mut self, candidate: IceCandidate) {
        let Some(session) = &self.session else {
            warn!("No peer connection available for ICE candidate");
            return;
        };

        let peer = session.peer.clone();
        match peer.add_ice_candidate(candidate).await {
            Ok(()) => debug!("Added ICE candidate"),
            Err(e) => {
                warn!("Error adding ICE candidate: {}", e);
                self.publish(format!("Error adding ICE candidate: {}", e));
            }
        }
    }

    fn report_offer_error(&self, e: NegotiationError) {
        warn!("Error handling offer: {}", e);
        self.publish(format!("Error handling offer: {}", e));
    }

    fn flush_pending_candidates(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let pending = std::mem::take(&mut session.pending_candidates);
        for candidate in pending {
            self.emit(SignalMessage::IceCandidate { candidate });
        }
    }
}
