use beacon_core::IceServerConfig;

pub const DEFAULT_RELAY_URL: &str = "ws://127.0.0.1:3000/ws";

/// Buffered user and relay commands waiting for the engine.
pub const COMMAND_CAPACITY: usize = 64;

/// Buffered callbacks from the peer connection waiting for the engine.
pub const PEER_EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub url: String,
    pub ice_servers: Vec<IceServerConfig>,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ice_servers: IceServerConfig::default_stun(),
        }
    }

    /// Replaces the default STUN servers. An empty list keeps the defaults.
    pub fn with_stun_servers(mut self, urls: Vec<String>) -> Self {
        if !urls.is_empty() {
            self.ice_servers = urls.into_iter().map(IceServerConfig::stun).collect();
        }
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_RELAY_URL)
    }
}
