use beacon_core::{ConnectionId, Role, SignalMessage};

/// Events the transport feeds into the relay loop.
#[derive(Debug)]
pub enum RelayCommand {
    /// First message on a fresh socket: claim a role.
    Register { id: ConnectionId, role: Role },

    /// Any other signaling message, to be routed by role.
    Signal {
        id: ConnectionId,
        message: SignalMessage,
    },

    /// The socket closed or dropped.
    Disconnect { id: ConnectionId },

    /// Stop the loop and drop every registry entry.
    Shutdown,
}
