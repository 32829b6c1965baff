mod app;
mod status;
mod ui;

pub use app::*;
pub use status::*;
pub use ui::*;
