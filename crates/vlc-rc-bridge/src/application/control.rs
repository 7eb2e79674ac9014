//! The seam between the HTTP layer and the rc session.
//!
//! Handlers only see `Arc<dyn RemoteControl>`.  In production that is a
//! [`Supervisor`](crate::application::Supervisor) wrapping the
//! [`Session`]; in unit tests it is a `MockRemoteControl` generated by
//! `mockall`.

use std::sync::Arc;

use async_trait::async_trait;
use vlc_rc_core::{Session, SessionError};

/// Request/response access to a VLC rc interface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteControl: Send + Sync {
    /// Sends one command line and returns the framed reply.
    async fn send(&self, command: &str) -> Result<String, SessionError>;

    /// Replaces the underlying connection with a fresh one.
    async fn reconnect(&self) -> Result<(), SessionError>;

    /// Whether a live connection is currently held.
    fn is_open(&self) -> bool;

    /// `host:port` of the rc interface, for health output and logs.
    fn remote(&self) -> String;
}

#[async_trait]
impl RemoteControl for Session {
    async fn send(&self, command: &str) -> Result<String, SessionError> {
        Session::send(self, command).await
    }

    async fn reconnect(&self) -> Result<(), SessionError> {
        Session::reconnect(self).await
    }

    fn is_open(&self) -> bool {
        Session::is_open(self)
    }

    fn remote(&self) -> String {
        self.addr().to_string()
    }
}

#[async_trait]
impl<T: RemoteControl + ?Sized> RemoteControl for Arc<T> {
    async fn send(&self, command: &str) -> Result<String, SessionError> {
        (**self).send(command).await
    }

    async fn reconnect(&self) -> Result<(), SessionError> {
        (**self).reconnect().await
    }

    fn is_open(&self) -> bool {
        (**self).is_open()
    }

    fn remote(&self) -> String {
        (**self).remote()
    }
}
