use crate::config::RELAY_COMMAND_CAPACITY;
use crate::http::{AppState, app};
use crate::registry::ConnectionRegistry;
use crate::relay::{Relay, RelayCommand};
use crate::signaling::SignalingService;
use anyhow::{Context, Result};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::info;

/// Wires the registry, relay loop and HTTP surface together.
pub struct BeaconServer {
    state: AppState,
    relay: Relay,
}

impl BeaconServer {
    pub fn new() -> Self {
        let registry = Arc::new(ConnectionRegistry::new());
        let (cmd_tx, cmd_rx) = mpsc::channel(RELAY_COMMAND_CAPACITY);
        let signaling = SignalingService::new(cmd_tx);
        let relay = Relay::new(registry.clone(), Arc::new(signaling.clone()), cmd_rx);

        Self {
            state: AppState {
                signaling,
                registry,
            },
            relay,
        }
    }

    pub fn registry(&self) -> Arc<ConnectionRegistry> {
        self.state.registry.clone()
    }

    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let signaling = self.state.signaling.clone();
        let relay_task = tokio::spawn(self.relay.run());

        info!(
            "Signaling relay listening on {}",
            listener.local_addr().context("listener has no local address")?
        );

        axum::serve(listener, app(self.state))
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")?;

        let _ = signaling.send_command(RelayCommand::Shutdown).await;
        relay_task.await.context("relay task panicked")?;
        Ok(())
    }
}

impl Default for BeaconServer {
    fn default() -> Self {
        Self::new()
    }
}
