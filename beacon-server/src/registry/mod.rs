mod connection_registry;
mod registry_error;

pub use connection_registry::*;
pub use registry_error::*;
