pub const DEFAULT_STUN_ADDR: &str = "stun:stun.l.google.com:19302";
pub const DEFAULT_STUN_ADDR_2: &str = "stun:stun1.l.google.com:19302";

/// Text carried by the presence broadcast when a producer registers.
pub const PRODUCER_ONLINE_MESSAGE: &str = "Producer is online";
/// Text carried by the presence broadcast when a producer goes away.
pub const PRODUCER_OFFLINE_MESSAGE: &str = "Producer disconnected";
