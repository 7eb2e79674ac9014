//! Application layer for vlc-rc-bridge.
//!
//! Knows *what* to do with a command but delegates *how* to reach VLC to
//! whatever implements [`RemoteControl`].
//!
//! # Responsibilities
//!
//! - The [`RemoteControl`] seam between the HTTP handlers and the session
//! - The reconnect [`Supervisor`] layered above the session
//! - Validating inbound command text and shaping replies into JSON bodies
//!
//! # What does NOT belong here?
//!
//! - Opening sockets or binding listeners (infrastructure)
//! - HTTP routing and status codes (infrastructure)

pub mod control;
pub mod reply;
pub mod supervisor;

pub use control::RemoteControl;
pub use reply::{to_command_reply, validate_command, CommandError};
pub use supervisor::Supervisor;
