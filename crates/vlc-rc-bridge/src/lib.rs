//! vlc-rc-bridge library crate.
//!
//! Exposes a VLC rc (remote control) interface over HTTP.  Each
//! `POST /vlc/{command}` is forwarded to the single long-lived rc session
//! and the reply comes back as JSON.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! HTTP client (JSON)
//!         ↕
//! [vlc-rc-bridge]
//!   ├── domain/           Pure types: BridgeConfig, ReconnectPolicy, JSON replies
//!   ├── application/      RemoteControl seam, reconnect Supervisor, reply shaping
//!   └── infrastructure/
//!         ├── http_server/ axum router + serve loop
//!         └── config_file/ optional TOML configuration
//!         ↕
//! [vlc-rc-core] Session  (one TCP connection to the rc interface)
//! ```
//!
//! # Layer rules
//!
//! - `domain` performs no I/O.
//! - `application` depends on `domain` and `vlc-rc-core` only.
//! - `infrastructure` depends on all other layers plus `axum` and `toml`.

/// Domain layer: configuration and JSON reply types (no I/O).
pub mod domain;

/// Application layer: the session seam, reconnect policy and reply shaping.
pub mod application;

/// Infrastructure layer: HTTP server and configuration file loading.
pub mod infrastructure;
