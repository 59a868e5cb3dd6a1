use crate::config::ReliabilityConfig;
use crate::error::{AuditError, LlmError};
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Classifies failures that may succeed on a later attempt.
pub trait Retryable {
    fn is_retryable(&self) -> bool;
}

impl Retryable for LlmError {
    fn is_retryable(&self) -> bool {
        self.is_server_error()
    }
}

impl Retryable for AuditError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Request(err) => err.is_retryable(),
            Self::Config(_)
            | Self::MalformedResponse(_)
            | Self::GenerationFailed(_)
            | Self::ContentBlocked(_) => false,
        }
    }
}

/// Bounded exponential backoff (base 2).
///
/// An operation runs at most `max_retries + 1` times. Only failures whose
/// [`Retryable::is_retryable`] is true are retried; anything else returns
/// immediately without sleeping. The policy holds no state between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
        Self {
            max_retries,
            initial_delay,
        }
    }

    pub fn from_config(config: &ReliabilityConfig) -> Self {
        Self::new(
            config.max_retries,
            Duration::from_millis(config.initial_backoff_ms),
        )
    }

    /// Sleep before each retry: `d, 2d, 4d, …`, one entry per retry.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + use<> {
        let initial = self.initial_delay;
        (0..self.max_retries).map(move |retry| initial.saturating_mul(1u32 << retry.min(31)))
    }

    /// Run `operation` under this policy. The last failure is returned
    /// unchanged once retries are exhausted.
    pub async fn run<T, E, F, Fut>(&self, operation: &str, mut f: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Retryable + Display,
    {
        let mut delay = self.initial_delay;
        let mut attempt: u32 = 0;

        loop {
            match f().await {
                Ok(value) => {
                    if attempt > 0 {
                        tracing::info!(operation, attempt, "Request recovered after retries");
                    }
                    return Ok(value);
                }
                Err(err) => {
                    if attempt >= self.max_retries || !err.is_retryable() {
                        return Err(err);
                    }

                    attempt += 1;
                    tracing::warn!(
                        operation,
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "Request failed with a server error, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    delay = delay.saturating_mul(2);
                }
            }
        }
    }
}
