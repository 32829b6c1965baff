mod relay_link;

pub use relay_link::*;
