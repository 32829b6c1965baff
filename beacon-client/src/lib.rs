pub mod config;
pub mod engine;
pub mod error;
pub mod peer;
pub mod transport;

pub use config::ClientConfig;
pub use engine::{
    ConsumerCommand, ConsumerEngine, ConsumerHandle, NegotiationState, StatusTone, StatusUpdate,
};
pub use error::NegotiationError;
pub use peer::{
    MediaKind, PeerConnection, PeerConnectionFactory, PeerConnectionState, PeerEvent,
    PeerEventKind, PeerEventSender, RemoteMedia, RtcPeerFactory,
};
pub use transport::RelayLink;
