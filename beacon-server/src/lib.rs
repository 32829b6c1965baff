pub mod config;
pub mod http;
pub mod registry;
pub mod relay;
pub mod server;
pub mod signaling;

pub use config::ServerConfig;
pub use http::{AppState, StatusReport, app};
pub use registry::{ConnectionRegistry, RegistryError};
pub use relay::{Relay, RelayCommand};
pub use server::BeaconServer;
pub use signaling::{
    DeliveryError, DeliveryReport, PresenceNotifier, RoutingError, SignalingOutput,
    SignalingRouter, SignalingService, destination_role,
};
