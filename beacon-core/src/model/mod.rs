mod connection;
mod role;
mod session;
mod signaling;

pub use connection::ConnectionId;
pub use role::Role;
pub use session::{IceCandidate, IceServerConfig, SdpType, SessionDescription};
pub use signaling::{MessageKind, SignalMessage, StreamRequest};
