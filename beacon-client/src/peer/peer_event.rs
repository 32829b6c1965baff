use beacon_core::IceCandidate;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerConnectionState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Audio,
    Video,
}

/// Remote stream attached to the session once tracks start arriving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteMedia {
    pub stream_id: String,
    pub tracks: Vec<(String, MediaKind)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PeerEventKind {
    LocalCandidate(IceCandidate),
    ConnectionState(PeerConnectionState),
    Track {
        stream_id: String,
        track_id: String,
        kind: MediaKind,
    },
}

/// Callback from a peer connection, tagged with the session that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct PeerEvent {
    pub session: u64,
    pub kind: PeerEventKind,
}

#[derive(Debug, Clone)]
pub struct PeerEventSender {
    session: u64,
    tx: mpsc::Sender<PeerEvent>,
}

impl PeerEventSender {
    pub fn new(session: u64, tx: mpsc::Sender<PeerEvent>) -> Self {
        Self { session, tx }
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    /// Returns false once the engine has gone away.
    pub async fn send(&self, kind: PeerEventKind) -> bool {
        self.tx
            .send(PeerEvent {
                session: self.session,
                kind,
            })
            .await
            .is_ok()
    }
}
