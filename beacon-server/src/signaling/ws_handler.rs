use crate::relay::RelayCommand;
use crate::signaling::SignalingService;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use beacon_core::{ConnectionId, SignalMessage};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    let id = ConnectionId::new();

    ws.on_upgrade(move |socket| handle_socket(socket, id, service))
}

async fn handle_socket(socket: WebSocket, id: ConnectionId, service: SignalingService) {
    let (mut sender, mut receiver) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel();

    service.add_peer(id, tx);
    info!("Client connected: {} ({} open)", id, service.open_sockets());

    let mut send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(msg).await.is_err() {
                break;
            }
        }
    });

    let mut recv_task = tokio::spawn({
        let service = service.clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        let signal = match serde_json::from_str::<SignalMessage>(&text) {
                            Ok(signal) => signal,
                            Err(e) => {
                                warn!("Invalid signal message from {}: {}", id, e);
                                continue;
                            }
                        };

                        let cmd = match signal {
                            SignalMessage::Register { role } => RelayCommand::Register { id, role },
                            message => RelayCommand::Signal { id, message },
                        };

                        if let Err(e) = service.send_command(cmd).await {
                            error!("Relay stopped: {}", e);
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    let recv_finished = tokio::select! {
        _ = (&mut send_task) => false,
        _ = (&mut recv_task) => true,
    };

    // The aborted half must be gone before `Disconnect` is queued, or a
    // `Register` it was still sending could land after it.
    if recv_finished {
        send_task.abort();
        let _ = send_task.await;
    } else {
        recv_task.abort();
        let _ = recv_task.await;
    }

    let _ = service.send_command(RelayCommand::Disconnect { id }).await;
    service.remove_peer(&id);
    info!("Client disconnected: {}", id);
}
