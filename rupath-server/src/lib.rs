//! HTTP chat service over the campus parking and bus datasets

pub mod config;
pub mod fallback;
pub mod routes;
pub mod state;

pub use config::{Args, ServerConfig};
pub use routes::build_router;
pub use state::AppState;
