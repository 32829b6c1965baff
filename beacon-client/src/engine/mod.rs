use crate::config::{COMMAND_CAPACITY, PEER_EVENT_CAPACITY};
use crate::peer::{PeerConnectionFactory, PeerEvent, RemoteMedia};
use beacon_core::SignalMessage;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::SendError;
use tracing::{debug, info};

mod connect_impl;
mod handle_peer_event_impl;
mod handle_signal_impl;
mod session;
mod state;

use session::NegotiationSession;
pub use state::*;

/// Inputs of the consumer engine: user actions and relay traffic.
#[derive(Debug)]
pub enum ConsumerCommand {
    Connect,
    Disconnect,
    RelayOpened,
    RelayClosed,
    Signal(SignalMessage),
    /// Stop the loop, closing any live peer connection on the way out.
    Shutdown,
}

/// Cloneable way into a running [`ConsumerEngine`].
#[derive(Clone)]
pub struct ConsumerHandle {
    command_tx: mpsc::Sender<ConsumerCommand>,
}

impl ConsumerHandle {
    pub async fn send(&self, cmd: ConsumerCommand) -> Result<(), SendError<ConsumerCommand>> {
        self.command_tx.send(cmd).await
    }

    /// For callers on a plain thread, e.g. an interactive prompt.
    pub fn blocking_send(&self, cmd: ConsumerCommand) -> Result<(), SendError<ConsumerCommand>> {
        self.command_tx.blocking_send(cmd)
    }

    pub async fn connect(&self) -> Result<(), SendError<ConsumerCommand>> {
        self.send(ConsumerCommand::Connect).await
    }

    pub async fn disconnect(&self) -> Result<(), SendError<ConsumerCommand>> {
        self.send(ConsumerCommand::Disconnect).await
    }

    pub async fn signal(&self, msg: SignalMessage) -> Result<(), SendError<ConsumerCommand>> {
        self.send(ConsumerCommand::Signal(msg)).await
    }
}

/// Consumer-side negotiation state machine.
///
/// All transitions run on the task that owns the engine, one input at a
/// time. Outbound signaling goes to `signal_tx`; every externally visible
/// change is reported once through `status_tx`.
pub struct ConsumerEngine {
    state: NegotiationState,
    session: Option<NegotiationSession>,
    next_session_id: u64,
    producer_online: bool,
    factory: Arc<dyn PeerConnectionFactory>,
    signal_tx: mpsc::UnboundedSender<SignalMessage>,
    status_tx: mpsc::UnboundedSender<StatusUpdate>,
    command_rx: mpsc::Receiver<ConsumerCommand>,
    peer_tx: mpsc::Sender<PeerEvent>,
    peer_rx: mpsc::Receiver<PeerEvent>,
}

impl ConsumerEngine {
    pub fn new(
        factory: Arc<dyn PeerConnectionFactory>,
        signal_tx: mpsc::UnboundedSender<SignalMessage>,
        status_tx: mpsc::UnboundedSender<StatusUpdate>,
    ) -> (Self, ConsumerHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CAPACITY);
        let (peer_tx, peer_rx) = mpsc::channel(PEER_EVENT_CAPACITY);

        let engine = Self {
            state: NegotiationState::Idle,
            session: None,
            next_session_id: 0,
            producer_online: false,
            factory,
            signal_tx,
            status_tx,
            command_rx,
            peer_tx,
            peer_rx,
        };

        (engine, ConsumerHandle { command_tx })
    }

    pub fn state(&self) -> NegotiationState {
        self.state
    }

    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn remote_media(&self) -> Option<&RemoteMedia> {
        self.session.as_ref().and_then(|s| s.remote_media.as_ref())
    }

    /// Local candidates held back until the answer is set.
    pub fn pending_candidates(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |s| s.pending_candidates.len())
    }

    pub async fn run(mut self) {
        info!("Consumer engine started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    match cmd {
                        Some(ConsumerCommand::Shutdown) => break,
                        Some(c) => self.handle_command(c).await,
                        None => {
                            info!("Command channel closed. Shutting down consumer.");
                            break;
                        }
                    }
                }

                Some(evt) = self.peer_rx.recv() => self.handle_peer_event(evt),
            }
        }

        self.release_session().await;
        info!("Consumer engine finished");
    }

    pub async fn handle_command(&mut self, cmd: ConsumerCommand) {
        match cmd {
            ConsumerCommand::Connect => self.connect().await,
            ConsumerCommand::Disconnect => self.disconnect().await,
            ConsumerCommand::RelayOpened => self.relay_opened(),
            ConsumerCommand::RelayClosed => self.relay_closed().await,
            ConsumerCommand::Signal(msg) => self.handle_signal(msg).await,
            ConsumerCommand::Shutdown => {
                if self.session.is_some() {
                    self.teardown("Stopped").await;
                }
            }
        }
    }

    /// Applies every peer callback queued so far. The run loop does this on
    /// its own; callers driving the engine by hand use it to catch up.
    pub fn process_pending_peer_events(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(evt) = self.peer_rx.try_recv() {
            self.handle_peer_event(evt);
            processed += 1;
        }
        processed
    }

    fn emit(&self, msg: SignalMessage) {
        let kind = msg.kind();
        if self.signal_tx.send(msg).is_err() {
            debug!("Relay link is gone, dropping {}", kind);
        }
    }

    fn transition(&mut self, next: NegotiationState, message: impl Into<String>) {
        debug!("{} -> {}", self.state, next);
        self.state = next;
        self.publish(message);
    }

    fn publish(&self, message: impl Into<String>) {
        let message = message.into();
        info!("{}", message);

        let update = StatusUpdate::project(
            self.state,
            self.session.is_some(),
            self.producer_online,
            self.remote_media().cloned(),
            message,
        );
        let _ = self.status_tx.send(update);
    }
}
