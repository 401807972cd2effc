//! Deadline and cancellation wrapper for collaborator calls.

use msight_error::Interruption;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Bounds a collaborator call by a timeout and a shared cancel signal.
///
/// Guards derived with [`CallGuard::with_timeout`] share the same token, so a
/// single cancel request reaches every call made under one user action.
///
/// # Examples
///
/// ```
/// use msight_core::CallGuard;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let guard = CallGuard::new(Duration::from_secs(5));
/// let value = guard.run(async { 42 }).await.unwrap();
/// assert_eq!(value, 42);
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CallGuard {
    timeout: Duration,
    cancel: CancellationToken,
}

impl CallGuard {
    /// Create a guard with a fresh cancel token.
    pub fn new(timeout: Duration) -> Self {
        Self::with_token(timeout, CancellationToken::new())
    }

    /// Create a guard bound to an existing cancel token.
    pub fn with_token(timeout: Duration, cancel: CancellationToken) -> Self {
        Self { timeout, cancel }
    }

    /// Same cancel token, different deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout,
            cancel: self.cancel.clone(),
        }
    }

    /// Request cancellation of every call under this guard.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drive `fut` to completion unless the deadline passes or cancellation
    /// is requested first. The future is dropped on interruption.
    pub async fn run<F>(&self, fut: F) -> Result<F::Output, Interruption>
    where
        F: Future,
    {
        if self.cancel.is_cancelled() {
            debug!("Call skipped, already cancelled");
            return Err(Interruption::Cancelled);
        }

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {
                debug!("Call cancelled");
                Err(Interruption::Cancelled)
            }
            result = tokio::time::timeout(self.timeout, fut) => {
                result.map_err(|_| {
                    let seconds = whole_seconds(self.timeout);
                    warn!(timeout_ms = self.timeout.as_millis() as u64, "Call timed out");
                    Interruption::TimedOut { seconds }
                })
            }
        }
    }
}

/// Deadline in whole seconds, rounded up so sub-second deadlines never read 0s.
fn whole_seconds(timeout: Duration) -> u64 {
    if timeout.subsec_nanos() > 0 {
        timeout.as_secs().saturating_add(1)
    } else {
        timeout.as_secs()
    }
}
