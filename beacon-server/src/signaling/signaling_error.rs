use beacon_core::{ConnectionId, MessageKind, Role};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    #[error("sender {0} has not registered a role")]
    UnknownSender(ConnectionId),

    #[error("{kind} from a {role} has no destination")]
    Unroutable { role: Role, kind: MessageKind },
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("connection {0} is closed")]
    Disconnected(ConnectionId),

    #[error("failed to encode signal message: {0}")]
    Encode(#[from] serde_json::Error),
}
