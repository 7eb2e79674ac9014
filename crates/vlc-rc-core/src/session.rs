//! The persistent session to the VLC rc interface.
//!
//! A [`Session`] owns exactly one TCP connection and serves request/response
//! exchanges over it one at a time.
//!
//! # Exchange lifecycle
//!
//! ```text
//! send("status")
//!   lock ──► drain stale bytes (≤ drain_window)
//!        ──► write "status\n"            ┐
//!        ──► read until "> " or EOF      ┘ bounded by exchange_timeout
//!        ──► frame: drop echo, drop prompt, trim
//!   unlock
//! ```
//!
//! # One lock per exchange
//!
//! The rc protocol has no request identifiers.  If two commands were written
//! before either reply was read, there would be no way to tell which reply
//! belongs to which caller.  Holding a single `tokio::sync::Mutex` from the
//! drain to the last read guarantees that bytes of different exchanges never
//! interleave on the wire.
//!
//! # State
//!
//! The transport lives in an `Option` behind the mutex: `Some` is Open,
//! `None` is Closed.  An `AtomicBool` mirrors it so that health checks can
//! read the state without queueing behind an in-flight exchange.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio::time::{timeout, timeout_at, Instant};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::{RemoteAddr, SessionConfig};
use crate::error::SessionError;
use crate::framing;

/// Size of each individual `read()` on the socket (banner, drain, reply).
pub const READ_CHUNK_SIZE: usize = 1024;

/// A live TCP connection plus the identifier used in log fields.
#[derive(Debug)]
struct Transport {
    stream: TcpStream,
    id: Uuid,
}

/// The single logical connection to the rc interface.
///
/// Construct it once with [`Session::establish`], share it behind an `Arc`,
/// and call [`Session::close`] at shutdown.
///
/// # Example
///
/// ```no_run
/// use vlc_rc_core::{RemoteAddr, Session, SessionConfig};
///
/// # async fn example() -> Result<(), vlc_rc_core::SessionError> {
/// let session = Session::establish(RemoteAddr::new("localhost", 9000), SessionConfig::default()).await?;
/// let reply = session.send("status").await?;
/// println!("{reply}");
/// session.close().await;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Session {
    addr: RemoteAddr,
    config: SessionConfig,
    open: AtomicBool,
    transport: Mutex<Option<Transport>>,
}

impl Session {
    /// Connects to `addr` and discards the greeting banner.
    ///
    /// # Errors
    ///
    /// [`SessionError::Connect`] if the TCP connection cannot be opened,
    /// [`SessionError::Banner`] if the banner read fails, times out, or the
    /// peer closes first.  No session is produced in either case.
    pub async fn establish(addr: RemoteAddr, config: SessionConfig) -> Result<Self, SessionError> {
        let transport =
            open_transport(&addr, config.connect_timeout, config.banner_timeout).await?;
        info!(remote = %addr, connection = %transport.id, "connected to VLC rc interface");

        Ok(Self {
            addr,
            config,
            open: AtomicBool::new(true),
            transport: Mutex::new(Some(transport)),
        })
    }

    /// Sends one command line and returns the framed reply.
    ///
    /// Concurrent callers are queued on the session lock; each exchange runs
    /// to completion before the next one touches the socket.  End-of-input
    /// while reading is not an error: whatever arrived is framed and
    /// returned.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Closed`] without any I/O if the session is closed.
    /// - [`SessionError::Write`] / [`SessionError::Read`] on socket failure.
    /// - [`SessionError::Timeout`] when the exchange deadline elapses.
    pub async fn send(&self, command: &str) -> Result<String, SessionError> {
        if !self.is_open() {
            return Err(SessionError::Closed);
        }

        let mut guard = self.transport.lock().await;
        // Closed while we were queued on the lock.
        let transport = guard.as_mut().ok_or(SessionError::Closed)?;

        let stale = drain(&mut transport.stream, self.config.drain_window).await;
        if stale > 0 {
            debug!(connection = %transport.id, bytes = stale, "discarded stale bytes before command");
        }

        let raw = exchange(&mut transport.stream, command, self.config.exchange_timeout)
            .await
            .inspect_err(|e| warn!(connection = %transport.id, command, "exchange failed: {e}"))?;

        let reply = framing::extract_reply(&String::from_utf8_lossy(&raw), command);
        debug!(
            connection = %transport.id,
            command,
            raw_bytes = raw.len(),
            reply_bytes = reply.len(),
            "exchange complete"
        );

        Ok(reply)
    }

    /// Replaces the transport with a fresh connection to the same address.
    ///
    /// Callable in either state.  The old transport (if any) is shut down
    /// before dialing.  Unlike [`Session::establish`], the connect and the
    /// banner read are always bounded; unset deadlines fall back to the
    /// exchange timeout because the session lock is held throughout.
    ///
    /// # Errors
    ///
    /// [`SessionError::Connect`] / [`SessionError::Banner`] as for
    /// [`Session::establish`].  The session is left Closed on failure.
    pub async fn reconnect(&self) -> Result<(), SessionError> {
        let mut guard = self.transport.lock().await;

        if let Some(old) = guard.take() {
            debug!(connection = %old.id, "dropping transport for reconnect");
            shutdown(old).await;
        }
        self.open.store(false, Ordering::Release);

        let fresh = open_transport(
            &self.addr,
            Some(self.config.reconnect_connect_timeout()),
            Some(self.config.reconnect_banner_timeout()),
        )
        .await?;
        info!(remote = %self.addr, connection = %fresh.id, "reconnected to VLC rc interface");

        *guard = Some(fresh);
        self.open.store(true, Ordering::Release);
        Ok(())
    }

    /// Shuts the transport down and marks the session Closed.
    ///
    /// Calling it again is a no-op.
    pub async fn close(&self) {
        let mut guard = self.transport.lock().await;

        if let Some(transport) = guard.take() {
            self.open.store(false, Ordering::Release);
            let id = transport.id;
            shutdown(transport).await;
            info!(remote = %self.addr, connection = %id, "closed VLC rc connection");
        }
    }

    /// Returns `true` while the session holds a live transport.
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    /// Identifier of the current transport, `None` when Closed.
    ///
    /// A new identifier is generated on every successful connect, so two
    /// values compare equal only if no reconnect happened in between.
    pub async fn connection_id(&self) -> Option<Uuid> {
        self.transport.lock().await.as_ref().map(|t| t.id)
    }

    pub fn addr(&self) -> &RemoteAddr {
        &self.addr
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }
}

// ── Connection setup ──────────────────────────────────────────────────────────

/// Dials `addr` and consumes the banner.
///
/// On banner failure the stream is dropped here, which closes the socket
/// before the error reaches the caller.
async fn open_transport(
    addr: &RemoteAddr,
    connect_timeout: Option<Duration>,
    banner_timeout: Option<Duration>,
) -> Result<Transport, SessionError> {
    // `TcpStream::connect` resolves the host on each call, so a DNS change is
    // picked up by the next reconnect.
    let host = addr.host.trim_start_matches('[').trim_end_matches(']');
    let connect = TcpStream::connect((host, addr.port));

    let connected = match connect_timeout {
        Some(limit) => timeout(limit, connect)
            .await
            .unwrap_or_else(|_| Err(timed_out("connect"))),
        None => connect.await,
    };

    let mut stream = connected.map_err(|source| SessionError::Connect {
        addr: addr.to_string(),
        source,
    })?;

    let banner_len = discard_banner(&mut stream, banner_timeout)
        .await
        .map_err(|source| SessionError::Banner {
            addr: addr.to_string(),
            source,
        })?;

    let id = Uuid::new_v4();
    debug!(connection = %id, bytes = banner_len, "discarded rc banner");

    Ok(Transport { stream, id })
}

/// Performs a single read of up to [`READ_CHUNK_SIZE`] bytes and throws the
/// content away.
///
/// The banner length is not announced by the protocol; one read is enough to
/// get past the greeting, and anything left over is removed by the next
/// drain.
async fn discard_banner(stream: &mut TcpStream, limit: Option<Duration>) -> io::Result<usize> {
    let mut buf = [0u8; READ_CHUNK_SIZE];

    let read = match limit {
        Some(limit) => timeout(limit, stream.read(&mut buf))
            .await
            .unwrap_or_else(|_| Err(timed_out("banner read"))),
        None => stream.read(&mut buf).await,
    };

    match read? {
        0 => Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "connection closed before banner",
        )),
        n => Ok(n),
    }
}

async fn shutdown(mut transport: Transport) {
    if let Err(e) = transport.stream.shutdown().await {
        debug!(connection = %transport.id, "socket shutdown failed: {e}");
    }
    // Dropping the stream closes the descriptor.
}

fn timed_out(what: &str) -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, format!("{what} timed out"))
}

// ── Exchange steps ────────────────────────────────────────────────────────────

/// Discards bytes left over from earlier exchanges.
///
/// Reads until `window` has elapsed in total, the peer closes, or a read
/// fails.  None of those outcomes is an error here; the return value is only
/// the number of bytes thrown away.
async fn drain(stream: &mut TcpStream, window: Duration) -> usize {
    let deadline = Instant::now() + window;
    let mut scratch = [0u8; READ_CHUNK_SIZE];
    let mut discarded = 0;

    loop {
        // `read` is cancel-safe: when the deadline fires, no bytes are lost.
        match timeout_at(deadline, stream.read(&mut scratch)).await {
            Ok(Ok(0)) | Ok(Err(_)) | Err(_) => break,
            Ok(Ok(n)) => discarded += n,
        }
    }

    discarded
}

/// Writes `command` and accumulates the reply until the prompt, EOF, or the
/// deadline.
///
/// TCP may split the reply across any number of reads, so bytes are
/// collected in one buffer and the prompt is searched for in the whole
/// buffer after each read (the sentinel itself may straddle two reads).
async fn exchange(
    stream: &mut TcpStream,
    command: &str,
    limit: Duration,
) -> Result<Vec<u8>, SessionError> {
    let deadline = Instant::now() + limit;

    let line = framing::encode_command(command);
    timeout_at(deadline, async {
        stream.write_all(&line).await?;
        stream.flush().await
    })
    .await
    .map_err(|_| SessionError::Timeout(limit))?
    .map_err(SessionError::Write)?;

    let mut response: Vec<u8> = Vec::with_capacity(READ_CHUNK_SIZE);
    let mut chunk = [0u8; READ_CHUNK_SIZE];

    loop {
        let n = timeout_at(deadline, stream.read(&mut chunk))
            .await
            .map_err(|_| SessionError::Timeout(limit))?
            .map_err(SessionError::Read)?;

        if n == 0 {
            // End-of-input terminates the reply normally.
            break;
        }

        response.extend_from_slice(&chunk[..n]);

        if framing::contains_prompt(&response) {
            break;
        }
    }

    Ok(response)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
