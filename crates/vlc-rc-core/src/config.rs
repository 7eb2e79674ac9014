//! Session addressing and tunables.
//!
//! [`RemoteAddr`] names the rc endpoint and is kept by the session so that
//! `reconnect` can dial the same place again.  [`SessionConfig`] carries the
//! timing knobs; the defaults reproduce the reference behaviour of the rc
//! bridge (100 ms drain window, 5 s exchange deadline, no connect or banner
//! deadline).

use std::fmt;
use std::time::Duration;

/// Default window during which stale bytes are drained before a command.
pub const DEFAULT_DRAIN_WINDOW: Duration = Duration::from_millis(100);

/// Default deadline covering the write and read phase of one exchange.
pub const DEFAULT_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Host and port of the VLC rc interface.
///
/// The host is kept as a string (not a `SocketAddr`) so that names such as
/// `localhost` are resolved on every connect, including reconnects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteAddr {
    pub host: String,
    pub port: u16,
}

impl RemoteAddr {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for RemoteAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bare IPv6 literals need brackets to be unambiguous.
        if self.host.contains(':') && !self.host.starts_with('[') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// Timing configuration for a [`crate::Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long `send` keeps discarding stale bytes before writing.
    pub drain_window: Duration,

    /// Deadline for the write + read-until-prompt phase of `send`.
    pub exchange_timeout: Duration,

    /// Optional bound on the TCP connect in `establish` / `reconnect`.
    pub connect_timeout: Option<Duration>,

    /// Optional bound on the banner read in `establish` / `reconnect`.
    ///
    /// `None` waits for the banner indefinitely in `establish`; `reconnect`
    /// uses `exchange_timeout` instead.
    pub banner_timeout: Option<Duration>,
}

impl SessionConfig {
    /// Connect deadline applied by `reconnect`.
    pub fn reconnect_connect_timeout(&self) -> Duration {
        self.connect_timeout.unwrap_or(self.exchange_timeout)
    }

    /// Banner deadline applied by `reconnect`.
    pub fn reconnect_banner_timeout(&self) -> Duration {
        self.banner_timeout.unwrap_or(self.exchange_timeout)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            drain_window: DEFAULT_DRAIN_WINDOW,
            exchange_timeout: DEFAULT_EXCHANGE_TIMEOUT,
            connect_timeout: None,
            banner_timeout: None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
