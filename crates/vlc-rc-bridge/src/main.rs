//! VLC rc HTTP bridge: entry point.
//!
//! Opens one long-lived connection to a VLC rc interface
//! (`vlc --extraintf rc --rc-host localhost:9000`) and serves it over HTTP:
//!
//! ```text
//! curl -X POST http://localhost:9091/vlc/status
//! {"response":["( audio volume: 256 )","( state playing )"]}
//! ```
//!
//! # Usage
//!
//! ```text
//! vlc-rc-bridge [OPTIONS]
//!
//! Options:
//!   --server <HOST>                 VLC rc host [default: localhost]
//!   --port <PORT>                   VLC rc port [default: 9000]
//!   --http <PORT>                   HTTP listen port [default: 9091]
//!   --bind <IP>                     HTTP bind address [default: 0.0.0.0]
//!   --exchange-timeout-ms <MS>      Deadline per command [default: 5000]
//!   --drain-ms <MS>                 Stale-byte drain window [default: 100]
//!   --connect-timeout-ms <MS>       Deadline for the TCP connect [default: none]
//!   --banner-timeout-ms <MS>        Deadline for the banner read [default: none]
//!   --reconnect-after <N>           Transport failures before reconnecting, 0 = never [default: 3]
//!   --log-level <FILTER>            Log filter when RUST_LOG is unset [default: info]
//!   --config <PATH>                 Optional TOML configuration file
//! ```
//!
//! # Precedence
//!
//! CLI flag > environment variable > config file > built-in default.
//!
//! | Variable               | Flag                    |
//! |------------------------|-------------------------|
//! | `VLC_RC_SERVER`        | `--server`              |
//! | `VLC_RC_PORT`          | `--port`                |
//! | `VLC_RC_HTTP_PORT`     | `--http`                |
//! | `VLC_RC_HTTP_BIND`     | `--bind`                |
//! | `VLC_RC_CONFIG`        | `--config`              |
//! | `VLC_RC_LOG_LEVEL`     | `--log-level`           |

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Context};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use vlc_rc_bridge::application::{RemoteControl, Supervisor};
use vlc_rc_bridge::domain::config::{DEFAULT_HTTP_PORT, DEFAULT_RC_PORT, DEFAULT_RECONNECT_AFTER};
use vlc_rc_bridge::domain::{BridgeConfig, ReconnectPolicy};
use vlc_rc_bridge::infrastructure::{load_config_file, run_server, FileConfig};
use vlc_rc_core::{RemoteAddr, Session, SessionConfig, DEFAULT_DRAIN_WINDOW, DEFAULT_EXCHANGE_TIMEOUT};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// HTTP bridge for the VLC rc interface.
///
/// Every option is optional so that an unset flag can fall through to the
/// config file; defaults are applied in [`Cli::into_bridge_config`].
#[derive(Debug, Default, Parser)]
#[command(
    name = "vlc-rc-bridge",
    about = "Forwards HTTP requests to a VLC rc interface and returns JSON",
    version
)]
struct Cli {
    /// Hostname or IP address of the VLC rc interface.
    #[arg(long, env = "VLC_RC_SERVER")]
    server: Option<String>,

    /// TCP port of the VLC rc interface.
    #[arg(long, env = "VLC_RC_PORT")]
    port: Option<u16>,

    /// Port for the HTTP server.
    #[arg(long = "http", env = "VLC_RC_HTTP_PORT")]
    http_port: Option<u16>,

    /// IP address the HTTP server binds to.
    ///
    /// `0.0.0.0` accepts connections on every interface, `127.0.0.1` only
    /// local ones.
    #[arg(long, env = "VLC_RC_HTTP_BIND")]
    bind: Option<String>,

    /// Deadline for writing one command and reading its reply.
    #[arg(long, env = "VLC_RC_EXCHANGE_TIMEOUT_MS")]
    exchange_timeout_ms: Option<u64>,

    /// How long stale bytes are drained before each command.
    #[arg(long, env = "VLC_RC_DRAIN_MS")]
    drain_ms: Option<u64>,

    /// Deadline for the TCP connect.  `0` means no deadline.
    #[arg(long, env = "VLC_RC_CONNECT_TIMEOUT_MS")]
    connect_timeout_ms: Option<u64>,

    /// Deadline for the banner VLC sends on connect.  `0` means no deadline.
    #[arg(long, env = "VLC_RC_BANNER_TIMEOUT_MS")]
    banner_timeout_ms: Option<u64>,

    /// Consecutive transport failures before the bridge reconnects.
    #[arg(long, env = "VLC_RC_RECONNECT_AFTER")]
    reconnect_after: Option<u32>,

    /// `tracing` filter used when `RUST_LOG` is not set.
    #[arg(long, env = "VLC_RC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file.
    #[arg(long, env = "VLC_RC_CONFIG")]
    config: Option<PathBuf>,
}

impl Cli {
    /// Loads the config file named by `--config`, if any.
    fn load_file(&self) -> anyhow::Result<FileConfig> {
        match &self.config {
            Some(path) => load_config_file(path)
                .with_context(|| format!("failed to load config file {}", path.display())),
            None => Ok(FileConfig::default()),
        }
    }

    /// Layers the CLI (and environment) over `file` and the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the bind address is not an IP address or the
    /// exchange timeout is zero.
    fn into_bridge_config(self, file: FileConfig) -> anyhow::Result<BridgeConfig> {
        let defaults = BridgeConfig::default();

        let host = self
            .server
            .or(file.remote.host)
            .unwrap_or(defaults.remote.host);
        let port = self.port.or(file.remote.port).unwrap_or(DEFAULT_RC_PORT);

        let bind = self.bind.or(file.http.bind);
        let bind_ip: IpAddr = match bind {
            Some(bind) => bind
                .parse()
                .with_context(|| format!("invalid HTTP bind address: '{bind}'"))?,
            None => defaults.http_bind_addr.ip(),
        };
        let http_port = self
            .http_port
            .or(file.http.port)
            .unwrap_or(DEFAULT_HTTP_PORT);

        let exchange_timeout = self
            .exchange_timeout_ms
            .or(file.session.exchange_timeout_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_EXCHANGE_TIMEOUT);
        ensure!(!exchange_timeout.is_zero(), "exchange timeout must be greater than 0");

        let drain_window = self
            .drain_ms
            .or(file.session.drain_ms)
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_DRAIN_WINDOW);

        let connect_timeout = optional_deadline(
            self.connect_timeout_ms.or(file.session.connect_timeout_ms),
        );
        let banner_timeout =
            optional_deadline(self.banner_timeout_ms.or(file.session.banner_timeout_ms));

        let reconnect_after = self
            .reconnect_after
            .or(file.session.reconnect_after)
            .unwrap_or(DEFAULT_RECONNECT_AFTER);

        let log_level = self
            .log_level
            .or(file.logging.level)
            .unwrap_or(defaults.log_level);

        Ok(BridgeConfig {
            remote: RemoteAddr::new(host, port),
            http_bind_addr: SocketAddr::new(bind_ip, http_port),
            session: SessionConfig {
                drain_window,
                exchange_timeout,
                connect_timeout,
                banner_timeout,
            },
            reconnect: ReconnectPolicy::after_failures(reconnect_after),
            log_level,
        })
    }
}

/// `0` and "unset" both mean no deadline.
fn optional_deadline(ms: Option<u64>) -> Option<Duration> {
    ms.filter(|&ms| ms > 0).map(Duration::from_millis)
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file = cli.load_file()?;
    let config = cli.into_bridge_config(file)?;

    // `RUST_LOG` wins over the configured level.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    info!(
        "VLC rc bridge starting: rc={}, http={}, reconnect_after={}",
        config.remote, config.http_bind_addr, config.reconnect.failure_threshold
    );

    let session = match Session::establish(config.remote.clone(), config.session).await {
        Ok(session) => Arc::new(session),
        Err(e) => {
            error!("could not open rc session: {e}");
            return Err(e).context("startup aborted");
        }
    };

    let control: Arc<dyn RemoteControl> =
        Arc::new(Supervisor::new(Arc::clone(&session), config.reconnect));

    let served = run_server(config.http_bind_addr, control, shutdown_signal()).await;

    session.close().await;
    info!("VLC rc bridge stopped");
    served
}

/// Resolves on Ctrl+C.  If the handler cannot be installed the server runs
/// until killed.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(e) => {
            error!("failed to listen for Ctrl+C signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
