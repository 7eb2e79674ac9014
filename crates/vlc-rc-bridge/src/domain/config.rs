//! Bridge configuration types.
//!
//! [`BridgeConfig`] is the single source of truth for all runtime settings.
//! `main.rs` builds it from CLI arguments, environment variables and an
//! optional TOML file; tests build it directly or from [`Default`].

use std::net::SocketAddr;

use vlc_rc_core::{RemoteAddr, SessionConfig};

/// Default port of the VLC rc interface (`vlc --extraintf rc --rc-host :9000`).
pub const DEFAULT_RC_PORT: u16 = 9000;

/// Default HTTP listen port.
pub const DEFAULT_HTTP_PORT: u16 = 9091;

/// Default number of consecutive transport failures before a reconnect.
pub const DEFAULT_RECONNECT_AFTER: u32 = 3;

/// All runtime configuration for the bridge.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgeConfig {
    /// Where the VLC rc interface listens.
    pub remote: RemoteAddr,

    /// Address the HTTP server binds to.
    pub http_bind_addr: SocketAddr,

    /// Drain window, exchange deadline and optional connect/banner deadlines.
    pub session: SessionConfig,

    /// When the supervisor should reconnect on its own.
    pub reconnect: ReconnectPolicy,

    /// `tracing` filter used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl Default for BridgeConfig {
    /// | Field           | Default           |
    /// |-----------------|-------------------|
    /// | remote          | `localhost:9000`  |
    /// | http_bind_addr  | `0.0.0.0:9091`    |
    /// | session         | 100 ms drain, 5 s exchange |
    /// | reconnect       | after 3 failures  |
    /// | log_level       | `info`            |
    fn default() -> Self {
        Self {
            remote: RemoteAddr::new("localhost", DEFAULT_RC_PORT),
            http_bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_HTTP_PORT)),
            session: SessionConfig::default(),
            reconnect: ReconnectPolicy::default(),
            log_level: "info".to_string(),
        }
    }
}

/// Reconnect policy applied by the supervisor above the session.
///
/// The session itself never reconnects; this policy decides when the layer
/// above it should.  A threshold of `0` disables automatic reconnects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    /// Consecutive transport failures that trigger a reconnect.
    pub failure_threshold: u32,
}

impl ReconnectPolicy {
    pub const DISABLED: Self = Self {
        failure_threshold: 0,
    };

    pub fn after_failures(failure_threshold: u32) -> Self {
        Self { failure_threshold }
    }

    pub fn is_enabled(&self) -> bool {
        self.failure_threshold > 0
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::after_failures(DEFAULT_RECONNECT_AFTER)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_remote_is_localhost_9000() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.remote.to_string(), "localhost:9000");
    }

    #[test]
    fn test_default_http_port_is_9091() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.http_bind_addr.port(), 9091);
        assert!(cfg.http_bind_addr.ip().is_unspecified());
    }

    #[test]
    fn test_default_session_timings() {
        let cfg = BridgeConfig::default();
        assert_eq!(cfg.session.drain_window, Duration::from_millis(100));
        assert_eq!(cfg.session.exchange_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_reconnect_after_three_failures() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.failure_threshold, 3);
        assert!(policy.is_enabled());
    }

    #[test]
    fn test_disabled_policy_is_not_enabled() {
        assert!(!ReconnectPolicy::DISABLED.is_enabled());
        assert!(!ReconnectPolicy::after_failures(0).is_enabled());
    }

    #[test]
    fn test_default_log_level_is_info() {
        assert_eq!(BridgeConfig::default().log_level, "info");
    }
}
