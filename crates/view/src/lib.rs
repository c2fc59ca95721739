pub mod config;
pub mod controller;
pub mod event;
pub mod list;
pub mod state;
pub mod surface;

pub use config::*;
pub use controller::*;
pub use event::*;
pub use list::*;
pub use state::*;
pub use surface::*;
