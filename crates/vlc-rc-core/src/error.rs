//! Error taxonomy for the session adapter.
//!
//! Every failure the adapter can report falls into one of three classes:
//!
//! | Class           | Variants                         | Raised by                 |
//! |-----------------|----------------------------------|---------------------------|
//! | Connection      | [`SessionError::Connect`], [`SessionError::Banner`] | `establish`, `reconnect` |
//! | Closed session  | [`SessionError::Closed`]         | `send`                    |
//! | Transport       | [`SessionError::Write`], [`SessionError::Read`], [`SessionError::Timeout`] | `send` |
//!
//! The adapter never retries.  Callers use [`SessionError::class`] to decide
//! whether a reconnect is worth attempting.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Errors returned by [`crate::Session`] operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The TCP connection to the rc interface could not be opened.
    #[error("failed to connect to VLC at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// The connection opened but the greeting banner could not be read
    /// (read error, banner timeout, or the peer closed immediately).
    #[error("failed to read initial VLC message from {addr}: {source}")]
    Banner {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// `send` was called on a session that is not open.
    #[error("connection is closed")]
    Closed,

    /// Writing the command line failed.
    #[error("failed to send command to VLC: {0}")]
    Write(#[source] io::Error),

    /// Reading the reply failed for a reason other than end-of-input.
    #[error("failed to read response from VLC: {0}")]
    Read(#[source] io::Error),

    /// The write + read phase did not finish before the exchange deadline.
    #[error("no response from VLC within {0:?}")]
    Timeout(Duration),
}

/// Coarse classification of a [`SessionError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Opening the transport or reading the banner failed.
    Connection,
    /// The session was closed when the operation was attempted.
    ClosedSession,
    /// The exchange failed on a live transport.
    Transport,
}

impl SessionError {
    /// Returns the class this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Connect { .. } | Self::Banner { .. } => ErrorClass::Connection,
            Self::Closed => ErrorClass::ClosedSession,
            Self::Write(_) | Self::Read(_) | Self::Timeout(_) => ErrorClass::Transport,
        }
    }

    pub fn is_connection(&self) -> bool {
        self.class() == ErrorClass::Connection
    }

    pub fn is_closed(&self) -> bool {
        self.class() == ErrorClass::ClosedSession
    }

    pub fn is_transport(&self) -> bool {
        self.class() == ErrorClass::Transport
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn io_err(kind: io::ErrorKind) -> io::Error {
        io::Error::new(kind, "test")
    }

    #[test]
    fn test_connect_and_banner_are_connection_errors() {
        let connect = SessionError::Connect {
            addr: "localhost:9000".to_string(),
            source: io_err(io::ErrorKind::ConnectionRefused),
        };
        let banner = SessionError::Banner {
            addr: "localhost:9000".to_string(),
            source: io_err(io::ErrorKind::UnexpectedEof),
        };

        assert!(connect.is_connection());
        assert!(banner.is_connection());
        assert!(!connect.is_transport());
    }

    #[test]
    fn test_closed_is_its_own_class() {
        let err = SessionError::Closed;
        assert_eq!(err.class(), ErrorClass::ClosedSession);
        assert!(err.is_closed());
    }

    #[test]
    fn test_write_read_and_timeout_are_transport_errors() {
        let errors = [
            SessionError::Write(io_err(io::ErrorKind::BrokenPipe)),
            SessionError::Read(io_err(io::ErrorKind::ConnectionReset)),
            SessionError::Timeout(Duration::from_secs(5)),
        ];

        for err in &errors {
            assert!(err.is_transport(), "{err} must be a transport error");
        }
    }

    #[test]
    fn test_connect_message_names_the_address() {
        // The HTTP layer forwards this text verbatim, so it must identify the target.
        let err = SessionError::Connect {
            addr: "10.0.0.5:9000".to_string(),
            source: io_err(io::ErrorKind::ConnectionRefused),
        };
        assert!(err.to_string().contains("10.0.0.5:9000"));
    }

    #[test]
    fn test_closed_message_matches_reference_text() {
        assert_eq!(SessionError::Closed.to_string(), "connection is closed");
    }
}
