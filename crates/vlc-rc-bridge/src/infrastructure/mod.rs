//! Infrastructure layer for vlc-rc-bridge.
//!
//! # Responsibilities
//!
//! - Binding the HTTP listener and routing requests with axum
//! - Mapping application results onto status codes and JSON bodies
//! - Reading the optional TOML configuration file
//! - Graceful shutdown of the HTTP server
//!
//! # What does NOT belong here?
//!
//! - Talking to VLC (that is `vlc-rc-core`, reached through the application layer)
//! - Reconnect decisions (that is the application layer's supervisor)
//! - Merging CLI, environment and file settings (that is done in `main.rs`)

pub mod config_file;
pub mod http_server;

pub use config_file::{load_config_file, ConfigError, FileConfig};
pub use http_server::{router, run_server, serve, ApiError, AppState};
