//! HTTP server: routes, handlers and the serve loop.
//!
//! ```text
//! POST /vlc/{command}   forward one rc command, reply with its lines
//! GET  /health          report whether the rc connection is live
//! ```
//!
//! The `{command}` segment is percent-decoded by axum, so
//! `POST /vlc/volume%20256` sends `volume 256`.  Handlers reach VLC only
//! through the [`RemoteControl`] held in [`AppState`]; every request is
//! independent and concurrent requests are serialized by the session lock.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinError;
use tracing::{debug, info, warn};
use vlc_rc_core::SessionError;

use crate::application::{to_command_reply, validate_command, CommandError, RemoteControl};
use crate::domain::{CommandReply, ErrorReply, HealthReply};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub control: Arc<dyn RemoteControl>,
}

impl AppState {
    pub fn new(control: Arc<dyn RemoteControl>) -> Self {
        Self { control }
    }
}

/// Errors a handler can turn into an HTTP response.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The command text was refused before reaching VLC.
    #[error(transparent)]
    BadCommand(#[from] CommandError),

    /// The session failed; the body carries the session's error text.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The detached exchange task panicked or was cancelled.
    #[error("command task failed: {0}")]
    Task(#[from] JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadCommand(_) => StatusCode::BAD_REQUEST,
            ApiError::Session(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorReply {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/vlc/{command}", post(send_command))
        .route("/health", get(health))
        .with_state(state)
}

/// Forwards one command.
///
/// The exchange runs in its own task: if the client disconnects, hyper drops
/// this future, but the exchange still completes and consumes its reply, so
/// the reply can never surface as the answer to the next request.
async fn send_command(
    State(state): State<AppState>,
    Path(command): Path<String>,
) -> Result<Json<CommandReply>, ApiError> {
    validate_command(&command).inspect_err(|e| {
        warn!(?command, "rejected command: {e}");
    })?;

    debug!(command = %command, "forwarding command");
    let control = Arc::clone(&state.control);
    let exchange = tokio::spawn(async move {
        let result = control.send(&command).await;
        if let Err(e) = &result {
            warn!(command = %command, "command failed: {e}");
        }
        result
    });

    let reply = exchange.await??;

    Ok(Json(to_command_reply(&reply)))
}

async fn health(State(state): State<AppState>) -> Json<HealthReply> {
    Json(HealthReply {
        connected: state.control.is_open(),
        remote: state.control.remote(),
    })
}

// ── Serve loop ────────────────────────────────────────────────────────────────

/// Serves the router on an already-bound listener until `shutdown`
/// resolves.  In-flight requests are allowed to finish.
///
/// # Errors
///
/// Returns an error if the underlying accept loop fails.
pub async fn serve<F>(
    listener: TcpListener,
    control: Arc<dyn RemoteControl>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener
        .local_addr()
        .context("failed to read HTTP listener address")?;
    info!("HTTP bridge listening on {local_addr}");

    axum::serve(listener, router(AppState::new(control)))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server terminated unexpectedly")?;

    info!("HTTP bridge on {local_addr} stopped");
    Ok(())
}

/// Binds `bind_addr` and runs [`serve`] on it.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound (port in use, missing
/// permission) or if the server fails afterwards.
pub async fn run_server<F>(
    bind_addr: SocketAddr,
    control: Arc<dyn RemoteControl>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {bind_addr}"))?;

    serve(listener, control, shutdown).await
}

// ── Tests ─────────────────────────────────────────────────────────────────────
