/*!
 * Retry policy for external service calls.
 *
 * Only transient failures (see `ProviderError::is_transient`) are retried.
 * The delay doubles on each attempt, with a little random jitter so that
 * concurrent callers do not retry in lockstep.
 */

use log::warn;
use rand::Rng;
use std::future::Future;
use std::time::Duration;

use crate::errors::ProviderError;

/// How often and how patiently to retry a failing call
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry, doubled afterwards
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    pub fn new(max_retries: u32, backoff_base_ms: u64) -> Self {
        Self {
            max_retries,
            backoff_base_ms,
        }
    }

    /// A policy that makes exactly one attempt
    pub fn none() -> Self {
        Self::new(0, 0)
    }

    /// Delay before retry number `attempt` (1-based), without jitter
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64 << attempt.saturating_sub(1).min(16);
        Duration::from_millis(self.backoff_base_ms.saturating_mul(factor))
    }

    /// Run `operation` until it succeeds, fails fatally, or retries run out
    pub async fn run<T, F, Fut>(&self, label: &str, mut operation: F) -> Result<T, ProviderError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_transient() && attempt < self.max_retries => {
                    attempt += 1;
                    let jitter_max = self.backoff_base_ms / 4;
                    let jitter = Duration::from_millis(rand::rng().random_range(0..=jitter_max));
                    let delay = self.backoff(attempt) + jitter;
                    warn!(
                        "{} failed ({}), retry {}/{} in {} ms",
                        label,
                        e,
                        attempt,
                        self.max_retries,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, 1000)
    }
}
