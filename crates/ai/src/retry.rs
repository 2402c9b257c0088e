//! Timeout and exponential-backoff retry wrappers for AI service
//! calls.
//!
//! Both wrappers accept a [`CancellationToken`] so an abandoned wizard
//! stops its in-flight work instead of leaving it running behind the
//! scenes.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::AiError;

/// Tunable parameters for the exponential-backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt; the operation runs at most
    /// `max_retries + 1` times.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the delay between retries.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry `attempt` (1-based):
    /// `min(initial * multiplier^(attempt - 1), max)`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = self.multiplier.powi(attempt.saturating_sub(1) as i32);
        let ms = (self.initial_delay.as_millis() as f64 * factor) as u64;
        Duration::from_millis(ms).min(self.max_delay)
    }
}

/// Race an operation against a deadline and the cancellation token.
///
/// The deadline produces [`AiError::Timeout`] (its message mentions
/// "took too long"); cancellation produces [`AiError::Cancelled`].
/// Losing futures are dropped, which aborts their work.
pub async fn with_timeout<T, F>(
    fut: F,
    timeout: Duration,
    cancel: &CancellationToken,
) -> Result<T, AiError>
where
    F: Future<Output = Result<T, AiError>>,
{
    tokio::select! {
        _ = cancel.cancelled() => Err(AiError::Cancelled),
        _ = tokio::time::sleep(timeout) => Err(AiError::timed_out(timeout.as_millis() as u64)),
        result = fut => result,
    }
}

/// Run an operation with exponential-backoff retry.
///
/// The operation runs up to `max_retries + 1` times. A non-retryable
/// error (see [`AiError::is_retryable`]) is returned immediately; the
/// last error is returned once retries are exhausted. Backoff sleeps
/// respect the cancellation token.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut operation: F,
) -> Result<T, AiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AiError>>,
{
    let mut attempt = 0u32;

    loop {
        if cancel.is_cancelled() {
            return Err(AiError::Cancelled);
        }

        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if !err.is_retryable() => return Err(err),
            Err(err) if attempt >= policy.max_retries => {
                tracing::warn!(attempt = attempt + 1, error = %err, "Giving up after final attempt");
                return Err(err);
            }
            Err(err) => {
                attempt += 1;
                let delay = policy.delay_for(attempt);
                tracing::warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "AI call failed, retrying",
                );
                tokio::select! {
                    _ = cancel.cancelled() => return Err(AiError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
