use crate::relay::RelayCommand;
use crate::signaling::{DeliveryError, SignalingOutput};
use async_trait::async_trait;
use axum::extract::ws::Message;
use beacon_core::{ConnectionId, SignalMessage};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

struct SignalingInner {
    peers: DashMap<ConnectionId, mpsc::UnboundedSender<Message>>,
}

/// WebSocket side of the relay: owns the outbound channel of every open
/// socket and forwards inbound traffic to the relay loop.
#[derive(Clone)]
pub struct SignalingService {
    inner: Arc<SignalingInner>,
    pub(crate) relay_cmd_tx: mpsc::Sender<RelayCommand>,
}

impl SignalingService {
    pub fn new(relay_cmd_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self {
            inner: Arc::new(SignalingInner {
                peers: DashMap::new(),
            }),
            relay_cmd_tx,
        }
    }

    pub fn add_peer(&self, id: ConnectionId, tx: mpsc::UnboundedSender<Message>) {
        self.inner.peers.insert(id, tx);
    }

    pub fn remove_peer(&self, id: &ConnectionId) {
        self.inner.peers.remove(id);
    }

    /// Number of open sockets, registered or not.
    pub fn open_sockets(&self) -> usize {
        self.inner.peers.len()
    }

    pub async fn send_command(
        &self,
        cmd: RelayCommand,
    ) -> Result<(), mpsc::error::SendError<RelayCommand>> {
        self.relay_cmd_tx.send(cmd).await
    }
}

#[async_trait]
impl SignalingOutput for SignalingService {
    async fn deliver(
        &self,
        to: &ConnectionId,
        message: &SignalMessage,
    ) -> Result<(), DeliveryError> {
        let json = serde_json::to_string(message)?;

        let Some(peer) = self.inner.peers.get(to) else {
            return Err(DeliveryError::Disconnected(*to));
        };

        peer.send(Message::Text(json.into()))
            .map_err(|_| DeliveryError::Disconnected(*to))?;

        debug!("Queued {} for {}", message.kind(), to);
        Ok(())
    }
}
