use crate::signaling::{DeliveryReport, SignalingRouter};
use beacon_core::utils::{PRODUCER_OFFLINE_MESSAGE, PRODUCER_ONLINE_MESSAGE};
use beacon_core::{ConnectionId, Role, SignalMessage};
use tracing::info;

/// Tells consumers when a producer comes or goes.
///
/// Consumer arrivals and departures produce no notification.
#[derive(Clone)]
pub struct PresenceNotifier {
    router: SignalingRouter,
}

impl PresenceNotifier {
    pub fn new(router: SignalingRouter) -> Self {
        Self { router }
    }

    /// Call once per successful registration.
    pub async fn on_registered(&self, id: &ConnectionId, role: Role) -> Option<DeliveryReport> {
        match role {
            Role::Producer => {
                let msg = SignalMessage::presence_online(PRODUCER_ONLINE_MESSAGE);
                let report = self.router.broadcast(Role::Consumer, &msg, Some(id)).await;
                info!(
                    "Producer {} online, notified {} consumer(s)",
                    id, report.delivered
                );
                Some(report)
            }
            Role::Consumer => None,
        }
    }

    /// Call once per removal, with the role the connection held.
    pub async fn on_unregistered(&self, id: &ConnectionId, role: Role) -> Option<DeliveryReport> {
        match role {
            Role::Producer => {
                let msg = SignalMessage::presence_offline(PRODUCER_OFFLINE_MESSAGE);
                let report = self.router.broadcast(Role::Consumer, &msg, Some(id)).await;
                info!(
                    "Producer {} offline, notified {} consumer(s)",
                    id, report.delivered
                );
                Some(report)
            }
            Role::Consumer => None,
        }
    }
}
