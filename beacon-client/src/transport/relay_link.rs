use crate::engine::{ConsumerCommand, ConsumerHandle};
use anyhow::{Context, Result};
use beacon_core::SignalMessage;
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

/// WebSocket connection to the relay, feeding the consumer engine.
///
/// Outbound messages are taken from the engine's signal channel; inbound
/// frames are parsed and handed to the engine as `ConsumerCommand::Signal`.
/// The engine hears `RelayOpened` once the socket is up and `RelayClosed`
/// when either direction ends.
pub struct RelayLink {
    task: JoinHandle<()>,
}

impl RelayLink {
    pub async fn connect(
        url: &str,
        handle: ConsumerHandle,
        mut outbound: mpsc::UnboundedReceiver<SignalMessage>,
    ) -> Result<Self> {
        let (ws, _) = connect_async(url)
            .await
            .with_context(|| format!("failed to connect to relay at {}", url))?;
        info!("Connected to signaling server at {}", url);

        let (mut sender, mut receiver) = ws.split();

        handle
            .send(ConsumerCommand::RelayOpened)
            .await
            .context("consumer engine is not running")?;

        let mut send_task = tokio::spawn(async move {
            while let Some(msg) = outbound.recv().await {
                let text = match serde_json::to_string(&msg) {
                    Ok(text) => text,
                    Err(e) => {
                        warn!("Failed to encode {}: {}", msg.kind(), e);
                        continue;
                    }
                };

                if sender.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            let _ = sender.close().await;
        });

        let inbound = handle.clone();
        let mut recv_task = tokio::spawn(async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => match serde_json::from_str::<SignalMessage>(&text) {
                        Ok(signal) => {
                            debug!("Relay -> {}", signal.kind());
                            if inbound.signal(signal).await.is_err() {
                                break;
                            }
                        }
                        Err(e) => warn!("Invalid message from relay: {}", e),
                    },
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        });

        let task = tokio::spawn(async move {
            tokio::select! {
                _ = &mut send_task => recv_task.abort(),
                _ = &mut recv_task => send_task.abort(),
            };

            info!("Disconnected from signaling server");
            let _ = handle.send(ConsumerCommand::RelayClosed).await;
        });

        Ok(Self { task })
    }

    /// Resolves once the link is down and the engine has been told.
    pub async fn closed(self) {
        let _ = self.task.await;
    }
}
