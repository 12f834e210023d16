//! Cold-start retry
//!
//! Some inference hosts answer with a transient "model is loading" status and
//! an estimated wait while a model is paged in. The retry here sleeps for the
//! upstream's estimate (or a default), then tries again, up to a fixed number
//! of attempts. Every other failure is returned immediately.

use backoff::backoff::Constant;
use std::future::Future;
use std::time::Duration;

use crate::defaults;
use crate::error::StudioError;
use crate::types::ProviderId;

/// Cold-start retry configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ColdStartPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Wait used when the upstream gives no estimate
    pub default_wait: Duration,
    /// Clamp for upstream estimates
    pub max_wait: Option<Duration>,
}

impl Default for ColdStartPolicy {
    fn default() -> Self {
        Self {
            max_attempts: defaults::cold_start::MAX_ATTEMPTS,
            default_wait: defaults::cold_start::DEFAULT_WAIT,
            max_wait: None,
        }
    }
}

impl ColdStartPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub const fn with_default_wait(mut self, wait: Duration) -> Self {
        self.default_wait = wait;
        self
    }

    pub const fn with_max_wait(mut self, wait: Option<Duration>) -> Self {
        self.max_wait = wait;
        self
    }

    /// Wait before the next attempt given the upstream estimate in seconds.
    pub fn wait_for(&self, estimated_secs: Option<f64>) -> Duration {
        // Estimates too large for a `Duration` are treated as "wait as long as allowed".
        let wait = match estimated_secs.filter(|s| *s >= 0.0) {
            Some(secs) => Duration::try_from_secs_f64(secs)
                .ok()
                .or(self.max_wait)
                .unwrap_or(self.default_wait),
            None => self.default_wait,
        };
        match self.max_wait {
            Some(max) => wait.min(max),
            None => wait,
        }
    }
}

/// Outcome of a single failed attempt.
#[derive(Debug)]
pub enum AttemptError {
    /// Transient "model loading" response, with the upstream estimate in seconds.
    Loading {
        estimated_secs: Option<f64>,
        error: StudioError,
    },
    /// Anything else; never retried.
    Fatal(StudioError),
}

impl From<StudioError> for AttemptError {
    fn from(error: StudioError) -> Self {
        Self::Fatal(error)
    }
}

/// Run `operation` until it succeeds, fails fatally, or the policy's attempt
/// budget is spent on loading responses.
///
/// `on_retry` is called with the chosen wait before each sleep. Attempts are
/// strictly sequential.
pub async fn retry_cold_start<F, Fut, T, N>(
    provider: ProviderId,
    policy: &ColdStartPolicy,
    mut operation: F,
    mut on_retry: N,
) -> Result<T, StudioError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
    N: FnMut(Duration),
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0u32;

    let op = || {
        attempt += 1;
        let current = attempt;
        let fut = operation();
        async move {
            match fut.await {
                Ok(value) => Ok(value),
                Err(AttemptError::Fatal(error)) => Err(backoff::Error::permanent(error)),
                Err(AttemptError::Loading { .. }) if current >= max_attempts => {
                    tracing::warn!(target: "genstudio::retry", %provider, attempts = current, "cold-start retries exhausted");
                    Err(backoff::Error::permanent(StudioError::RetryExhausted {
                        provider,
                        attempts: current,
                    }))
                }
                Err(AttemptError::Loading {
                    estimated_secs,
                    error,
                }) => {
                    let wait = policy.wait_for(estimated_secs);
                    tracing::info!(target: "genstudio::retry", %provider, attempt = current, wait_ms = wait.as_millis() as u64, "model loading, will retry");
                    Err(backoff::Error::retry_after(error, wait))
                }
            }
        }
    };

    backoff::future::retry_notify(
        Constant::new(policy.default_wait),
        op,
        |_err: StudioError, wait: Duration| on_retry(wait),
    )
    .await
}
