use anyhow::Result;
use beacon_client::config::DEFAULT_RELAY_URL;
use beacon_client::{
    ClientConfig, ConsumerCommand, ConsumerEngine, RelayLink, RtcPeerFactory, StatusTone,
    StatusUpdate,
};
use clap::Parser;
use colored::*;
use dialoguer::Select;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Time the engine gets to close the peer connection on exit.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

#[derive(Parser)]
#[command(name = "beacon-consumer", about = "Receives a producer's stream through a beacon relay")]
struct Args {
    /// WebSocket endpoint of the relay.
    #[arg(long, env = "BEACON_URL", default_value = DEFAULT_RELAY_URL)]
    url: String,

    /// STUN server URL; repeat to add more. Replaces the defaults.
    #[arg(long = "stun")]
    stun: Vec<String>,

    /// Request the stream as soon as the relay link is up.
    #[arg(long)]
    auto_connect: bool,

    /// Log filter, in `tracing_subscriber::EnvFilter` syntax.
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&args.log).unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let config = ClientConfig::new(args.url).with_stun_servers(args.stun);
    let factory = Arc::new(RtcPeerFactory::new(config.ice_servers.clone()));

    let (signal_tx, signal_rx) = mpsc::unbounded_channel();
    let (status_tx, mut status_rx) = mpsc::unbounded_channel();
    let (engine, handle) = ConsumerEngine::new(factory, signal_tx, status_tx);
    let engine_task = tokio::spawn(engine.run());

    tokio::spawn(async move {
        while let Some(update) = status_rx.recv().await {
            print_status(&update);
        }
    });

    println!("{} {}", "📡 Connecting to".cyan(), config.url.bold());
    let link = RelayLink::connect(&config.url, handle.clone(), signal_rx).await?;

    if args.auto_connect {
        handle.connect().await?;
    }

    let prompt_handle = handle.clone();
    let prompt = tokio::task::spawn_blocking(move || prompt_loop(prompt_handle));

    tokio::select! {
        _ = link.closed() => {
            println!("{}", "Relay connection closed".red());
        }
        res = prompt => {
            if let Err(e) = res {
                warn!("Prompt ended unexpectedly: {}", e);
            }
        }
    }

    let _ = handle.send(ConsumerCommand::Shutdown).await;
    if timeout(SHUTDOWN_GRACE, engine_task).await.is_err() {
        warn!("Consumer engine did not stop in time");
    }
    Ok(())
}

fn prompt_loop(handle: beacon_client::ConsumerHandle) {
    let items = ["Connect", "Disconnect", "Quit"];

    loop {
        let choice = match Select::new().items(&items).default(0).interact() {
            Ok(choice) => choice,
            Err(e) => {
                warn!("{}", e);
                return;
            }
        };

        let cmd = match choice {
            0 => ConsumerCommand::Connect,
            1 => ConsumerCommand::Disconnect,
            _ => return,
        };

        if handle.blocking_send(cmd).is_err() {
            return;
        }
    }
}

fn print_status(update: &StatusUpdate) {
    let line = match update.tone {
        StatusTone::Online => update.message.green(),
        StatusTone::Offline => update.message.red(),
        StatusTone::Connecting => update.message.yellow(),
    };
    println!("{} [{}]", line.bold(), update.state);

    if let Some(media) = &update.remote_media {
        for (track_id, kind) in &media.tracks {
            println!("   🎞  {:?} track {} on stream {}", kind, track_id, media.stream_id);
        }
    }
}
