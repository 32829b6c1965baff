use crate::registry::{ConnectionRegistry, RegistryError};
use crate::relay::RelayCommand;
use crate::signaling::{PresenceNotifier, RoutingError, SignalingOutput, SignalingRouter};
use beacon_core::{ConnectionId, Role, SignalMessage};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Single task that owns every registry mutation and every broadcast.
///
/// Commands are applied strictly one after another, so a disconnect can
/// never land in the middle of a fan-out.
pub struct Relay {
    registry: Arc<ConnectionRegistry>,
    router: SignalingRouter,
    presence: PresenceNotifier,
    command_rx: mpsc::Receiver<RelayCommand>,
}

impl Relay {
    pub fn new(
        registry: Arc<ConnectionRegistry>,
        output: Arc<dyn SignalingOutput>,
        command_rx: mpsc::Receiver<RelayCommand>,
    ) -> Self {
        let router = SignalingRouter::new(registry.clone(), output);
        let presence = PresenceNotifier::new(router.clone());

        Self {
            registry,
            router,
            presence,
            command_rx,
        }
    }

    pub fn registry(&self) -> &Arc<ConnectionRegistry> {
        &self.registry
    }

    pub async fn run(mut self) {
        info!("Relay event loop started");

        while let Some(cmd) = self.command_rx.recv().await {
            if matches!(cmd, RelayCommand::Shutdown) {
                break;
            }
            self.handle_command(cmd).await;
        }

        self.registry.clear();
        info!("Relay event loop finished");
    }

    pub async fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Register { id, role } => self.register(id, role).await,
            RelayCommand::Signal { id, message } => self.signal(id, message).await,
            RelayCommand::Disconnect { id } => self.disconnect(id).await,
            RelayCommand::Shutdown => self.registry.clear(),
        }
    }

    async fn register(&mut self, id: ConnectionId, role: Role) {
        match self.registry.register(id, role) {
            Ok(()) => {
                info!("Registered {}: {}", role, id);
                self.presence.on_registered(&id, role).await;
            }
            Err(RegistryError::DuplicateRegistration(_)) => {
                warn!("Ignoring repeated register from {} as {}", id, role);
            }
            Err(e) => warn!("Registration of {} failed: {}", id, e),
        }
    }

    async fn signal(&mut self, id: ConnectionId, message: SignalMessage) {
        match self.router.route(&id, &message).await {
            Ok(report) => debug!(
                "Routed {} from {} to {} peer(s), {} failed",
                message.kind(),
                id,
                report.delivered,
                report.failed
            ),
            Err(e @ RoutingError::UnknownSender(_)) => warn!("Dropped {}: {}", message.kind(), e),
            Err(e @ RoutingError::Unroutable { .. }) => warn!("Dropped message from {}: {}", id, e),
        }
    }

    async fn disconnect(&mut self, id: ConnectionId) {
        let Some(role) = self.registry.unregister(&id) else {
            debug!("Unregistered connection {} closed", id);
            return;
        };

        info!("Unregistered {}: {}", role, id);
        self.presence.on_unregistered(&id, role).await;
    }
}
