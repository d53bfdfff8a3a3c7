pub mod config;
pub mod context;
pub mod dataset;
pub mod loader;
pub mod snapshot;
pub mod surface;
pub mod view;
pub mod view_state;
pub mod zoom;

pub use config::*;
pub use context::*;
pub use dataset::*;
pub use loader::*;
pub use surface::*;
pub use view::*;
pub use view_state::*;
pub use zoom::*;
