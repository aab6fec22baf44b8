mod artist_routes;
pub mod config;
mod error;
mod flash;
mod http_layers;
mod record_id;
pub mod server;
mod show_routes;
pub mod state;
mod venue_routes;

pub use config::ServerConfig;
pub use error::ApiError;
pub use flash::{Flash, FlashCategory};
pub use http_layers::*;
#[allow(unused_imports)] // Used by main.rs
pub use server::run_server;
