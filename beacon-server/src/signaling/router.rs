use crate::registry::ConnectionRegistry;
use crate::signaling::{RoutingError, SignalingOutput};
use beacon_core::{ConnectionId, MessageKind, Role, SignalMessage};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of one fan-out.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Role set a message of `kind` sent by `sender` is forwarded to.
///
/// `None` means the pair is not part of the protocol. Registration and
/// presence events originate at the relay itself and are never forwarded.
pub fn destination_role(sender: Role, kind: MessageKind) -> Option<Role> {
    match (sender, kind) {
        (Role::Producer, MessageKind::Offer) => Some(Role::Consumer),
        (Role::Producer, MessageKind::IceCandidate) => Some(Role::Consumer),
        (Role::Consumer, MessageKind::Answer) => Some(Role::Producer),
        (Role::Consumer, MessageKind::IceCandidate) => Some(Role::Producer),
        (Role::Consumer, MessageKind::RequestStream) => Some(Role::Producer),
        (Role::Consumer, MessageKind::Offer)
        | (Role::Producer, MessageKind::Answer)
        | (Role::Producer, MessageKind::RequestStream) => None,
        (_, MessageKind::Register | MessageKind::PresenceOnline | MessageKind::PresenceOffline) => {
            None
        }
    }
}

#[derive(Clone)]
pub struct SignalingRouter {
    registry: Arc<ConnectionRegistry>,
    output: Arc<dyn SignalingOutput>,
}

impl SignalingRouter {
    pub fn new(registry: Arc<ConnectionRegistry>, output: Arc<dyn SignalingOutput>) -> Self {
        Self { registry, output }
    }

    /// Forwards `message` unchanged to every connection of the destination
    /// role, never back to the sender.
    ///
    /// An empty destination set is not an error: the report simply shows
    /// zero deliveries.
    pub async fn route(
        &self,
        sender: &ConnectionId,
        message: &SignalMessage,
    ) -> Result<DeliveryReport, RoutingError> {
        let role = self
            .registry
            .role_of(sender)
            .map_err(|_| RoutingError::UnknownSender(*sender))?;
        let kind = message.kind();

        let Some(destination) = destination_role(role, kind) else {
            return Err(RoutingError::Unroutable { role, kind });
        };

        let report = self.broadcast(destination, message, Some(sender)).await;
        if report.delivered == 0 && report.failed == 0 {
            debug!("No {} registered for {} from {}", destination, kind, sender);
        }
        Ok(report)
    }

    /// Delivers `message` to a snapshot of the `role` set.
    ///
    /// A failed delivery is logged and counted; the remaining destinations
    /// are still attempted.
    pub async fn broadcast(
        &self,
        role: Role,
        message: &SignalMessage,
        except: Option<&ConnectionId>,
    ) -> DeliveryReport {
        let mut report = DeliveryReport::default();

        for id in self.registry.connections_with_role(role) {
            if except == Some(&id) {
                continue;
            }

            match self.output.deliver(&id, message).await {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    warn!("Dropped {} for {}: {}", message.kind(), id, e);
                    report.failed += 1;
                }
            }
        }

        report
    }
}
