use beacon_core::ConnectionId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The connection already registered once; roles are fixed for a session.
    #[error("connection {0} is already registered")]
    DuplicateRegistration(ConnectionId),

    #[error("connection {0} is not registered")]
    NotFound(ConnectionId),
}
