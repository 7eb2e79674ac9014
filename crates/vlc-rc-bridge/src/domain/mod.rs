//! Domain layer for vlc-rc-bridge.
//!
//! Plain data types with no dependencies on sockets, HTTP frameworks or the
//! file system.
//!
//! # What belongs in the domain layer?
//!
//! - The resolved runtime configuration ([`BridgeConfig`])
//! - The reconnect policy settings ([`ReconnectPolicy`])
//! - The JSON bodies returned to HTTP clients

pub mod config;
pub mod messages;

pub use config::{BridgeConfig, ReconnectPolicy};
pub use messages::{CommandReply, ErrorReply, HealthReply};
