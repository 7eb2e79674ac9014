//! Reconnect supervisor layered above the session.
//!
//! The session reports failures but never recovers from them.  The
//! [`Supervisor`] watches the outcomes of `send` and decides when a
//! reconnect is due:
//!
//! | Outcome of `send`              | Supervisor action                              |
//! |--------------------------------|------------------------------------------------|
//! | `Ok`                           | reset the failure counter                      |
//! | transport error                | count it; reconnect once the policy threshold is reached |
//! | `Closed`                       | reconnect immediately                          |
//! | connection error               | nothing (only `reconnect` produces these)      |
//!
//! The failed command is never replayed: the caller always receives the
//! original error, and the next request runs on the new connection.
//!
//! Recovery is single-flight.  Each `send` notes the connection epoch it
//! started on; the epoch advances on every successful reconnect.  A failure
//! observed on an older epoch is stale and ignored, and only one reconnect
//! runs at a time, so a burst of concurrent failures during one outage
//! produces one reconnect.

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use async_trait::async_trait;
use tracing::{debug, info, warn};
use vlc_rc_core::SessionError;

use crate::application::control::RemoteControl;
use crate::domain::ReconnectPolicy;

/// Wraps a [`RemoteControl`] and reconnects it according to a
/// [`ReconnectPolicy`].
pub struct Supervisor<C> {
    inner: C,
    policy: ReconnectPolicy,
    consecutive_failures: AtomicU32,
    epoch: AtomicU64,
    recovering: AtomicBool,
}

impl<C: RemoteControl> Supervisor<C> {
    pub fn new(inner: C, policy: ReconnectPolicy) -> Self {
        Self {
            inner,
            policy,
            consecutive_failures: AtomicU32::new(0),
            epoch: AtomicU64::new(0),
            recovering: AtomicBool::new(false),
        }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn policy(&self) -> ReconnectPolicy {
        self.policy
    }

    /// Transport failures seen since the last success or reconnect.
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures.load(Ordering::Acquire)
    }

    /// Number of successful reconnects so far.
    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    /// Records the outcome of one `send` started on `epoch` and reports
    /// whether to reconnect.
    fn record(&self, epoch: u64, error: Option<&SessionError>) -> bool {
        match error {
            None => {
                self.consecutive_failures.store(0, Ordering::Release);
                false
            }
            Some(_) if epoch != self.epoch() => false,
            Some(e) if e.is_transport() => {
                let failures = self.consecutive_failures.fetch_add(1, Ordering::AcqRel) + 1;
                self.policy.is_enabled() && failures >= self.policy.failure_threshold
            }
            Some(e) if e.is_closed() => self.policy.is_enabled(),
            Some(_) => false,
        }
    }

    async fn recover(&self, epoch: u64) {
        if self
            .recovering
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("reconnect already in progress");
            return;
        }

        // A newer epoch means another request already recovered.
        if epoch == self.epoch() {
            let remote = self.inner.remote();
            match self.inner.reconnect().await {
                Ok(()) => {
                    self.mark_reconnected();
                    info!(%remote, "supervisor re-established the rc connection");
                }
                Err(e) => warn!(%remote, "supervisor reconnect failed: {e}"),
            }
        }

        self.recovering.store(false, Ordering::Release);
    }

    fn mark_reconnected(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
        self.consecutive_failures.store(0, Ordering::Release);
    }
}

#[async_trait]
impl<C: RemoteControl> RemoteControl for Supervisor<C> {
    async fn send(&self, command: &str) -> Result<String, SessionError> {
        let epoch = self.epoch();
        let result = self.inner.send(command).await;

        if self.record(epoch, result.as_ref().err()) {
            self.recover(epoch).await;
        }

        result
    }

    async fn reconnect(&self) -> Result<(), SessionError> {
        self.inner.reconnect().await?;
        self.mark_reconnected();
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    fn remote(&self) -> String {
        self.inner.remote()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
