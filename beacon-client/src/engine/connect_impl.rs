use crate::engine::session::NegotiationSession;
use crate::engine::{ConsumerEngine, NegotiationState};
use crate::peer::PeerEventSender;
use beacon_core::{Role, SignalMessage};
use tracing::{debug, info, warn};

impl ConsumerEngine {
    /// Starts a new session, replacing any session that is still around.
    pub async fn connect(&mut self) {
        if self.session.is_some() {
            self.teardown("Restarting stream").await;
        }

        info!("Attempting to connect to the producer stream...");

        self.next_session_id += 1;
        let id = self.next_session_id;
        let events = PeerEventSender::new(id, self.peer_tx.clone());

        match self.factory.create(events).await {
            Ok(peer) => {
                self.session = Some(NegotiationSession::new(id, peer));
                self.transition(NegotiationState::Requesting, "Connecting to stream...");
                self.emit(SignalMessage::request_stream());
            }
            Err(e) => {
                warn!("Error connecting: {}", e);
                self.publish("Connection failed");
            }
        }
    }

    /// User-initiated teardown. A second call in a row does nothing.
    pub async fn disconnect(&mut self) {
        if self.state == NegotiationState::Disconnected {
            debug!("Already disconnected");
            return;
        }
        self.teardown("Disconnected").await;
    }

    pub(crate) async fn teardown(&mut self, message: &str) {
        self.release_session().await;
        self.transition(NegotiationState::Disconnected, message);
    }

    /// Closes the peer connection and detaches remote media.
    pub(crate) async fn release_session(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        if let Err(e) = session.peer.close().await {
            warn!("{}", e);
        }
        info!("Released peer connection of session {}", session.id);
    }

    pub(crate) fn relay_opened(&mut self) {
        self.emit(SignalMessage::Register {
            role: Role::Consumer,
        });
        self.publish("Connected to server");
    }

    /// Losing the relay ends any session; the stream cannot be renegotiated
    /// without it.
    pub(crate) async fn relay_closed(&mut self) {
        self.producer_online = false;

        if self.session.is_some() {
            self.teardown("Disconnected from server").await;
        } else {
            self.publish("Disconnected from server");
        }
    }
}
