//! # vlc-rc-core
//!
//! Session adapter for the VLC `rc` (remote control) interface: a plain TCP
//! socket that accepts one text command per line and answers with free-form
//! text followed by a `"> "` prompt.
//!
//! This crate owns the protocol and concurrency semantics of the bridge.  It
//! has no HTTP or CLI code; the `vlc-rc-bridge` crate layers those on top.
//!
//! # Modules
//!
//! - **`session`** – [`Session`]: the single long-lived connection.  Serializes
//!   concurrent `send` calls, bounds each exchange with a deadline, and
//!   supports explicit `reconnect` / `close`.
//! - **`framing`** – Pure functions that find the prompt and cut the reply
//!   payload out of the raw text (echo and prompt removal).
//! - **`config`** – [`RemoteAddr`] and [`SessionConfig`] (drain window,
//!   exchange deadline, optional connect/banner deadlines).
//! - **`error`** – [`SessionError`] and its [`ErrorClass`] taxonomy.

pub mod config;
pub mod error;
pub mod framing;
pub mod session;

pub use config::{RemoteAddr, SessionConfig, DEFAULT_DRAIN_WINDOW, DEFAULT_EXCHANGE_TIMEOUT};
pub use error::{ErrorClass, SessionError};
pub use framing::{extract_reply, PROMPT};
pub use session::Session;
