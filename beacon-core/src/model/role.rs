use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the stream a connection plays.
///
/// The wire names are the ones the browser client and the producer plugin
/// already speak: `"producer"` (alias `"touchdesigner"`) and `"browser"`
/// (alias `"consumer"`).
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "producer", alias = "touchdesigner")]
    Producer,
    #[serde(rename = "browser", alias = "consumer")]
    Consumer,
}

impl Role {
    /// The role on the other end of the negotiation.
    pub fn opposite(self) -> Self {
        match self {
            Role::Producer => Role::Consumer,
            Role::Consumer => Role::Producer,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Producer => f.write_str("producer"),
            Role::Consumer => f.write_str("consumer"),
        }
    }
}
