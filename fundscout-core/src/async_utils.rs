//! Async utilities
//!
//! Cooperative cancellation and timed suspension for the workflow's
//! simulated latency. The orchestrator suspends at each step boundary via
//! [`sleep_or_cancelled`] and checks the token before resuming.

use crate::error::{ErrorContext, FundscoutError, FundscoutResult};
use tokio::sync::watch;
use tokio::time::{sleep, timeout, Duration};
use tracing::debug;

/// Cooperative cancellation token, cheap to clone and share
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

/// Handle that triggers cancellation for all associated tokens
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelToken {
    /// Create a token and the handle that cancels it
    pub fn new() -> (CancelHandle, CancelToken) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, CancelToken { rx })
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once cancellation is requested. If the handle is dropped
    /// without cancelling, cancellation can never arrive and this future
    /// never resolves.
    pub async fn cancelled(&mut self) {
        while !*self.rx.borrow() {
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

impl CancelHandle {
    /// Request cancellation; all tokens observe it at their next check
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Suspend for `duration`, resuming early if the token is cancelled.
/// Returns `true` when the full duration elapsed, `false` on cancellation.
pub async fn sleep_or_cancelled(duration: Duration, token: &CancelToken) -> bool {
    if token.is_cancelled() {
        debug!(duration_ms = duration.as_millis() as u64, "Suspension skipped, already cancelled");
        return false;
    }

    let mut token = token.clone();
    tokio::select! {
        _ = sleep(duration) => true,
        _ = token.cancelled() => {
            debug!(duration_ms = duration.as_millis() as u64, "Suspension interrupted by cancellation");
            false
        }
    }
}

/// Timeout wrapper for async operations
pub async fn with_timeout<F, T>(
    future: F,
    timeout_ms: u64,
    operation_name: &str,
) -> FundscoutResult<T>
where
    F: std::future::Future<Output = T>,
{
    match timeout(Duration::from_millis(timeout_ms), future).await {
        Ok(result) => Ok(result),
        Err(_) => Err(FundscoutError::Timeout {
            operation: operation_name.to_string(),
            duration_ms: timeout_ms,
            context: ErrorContext::new("async_utils")
                .with_operation("timeout")
                .with_suggestion("Increase timeout duration"),
        }),
    }
}
