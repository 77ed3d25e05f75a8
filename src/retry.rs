//! Bounded retry with exponential backoff for provider calls

use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Retry schedule for external provider calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total invocations allowed, first try included (at least 1)
    pub max_attempts: u32,
    /// Wait before the first re-invocation; doubles after each further
    /// failure
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Wait after the failure with this 0-based index:
    /// `base_delay * 2^attempt_index`
    pub fn delay_for(&self, attempt_index: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt_index))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(2),
        }
    }
}

/// Invoke `operation` up to `policy.max_attempts` times, sleeping between
/// attempts with exponential backoff. Waits happen only between attempts,
/// never after the last failed one, and the final error is returned exactly
/// as the operation produced it; retrying never rewraps errors.
pub async fn retry_call<T, E, F, Fut>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt >= max_attempts {
                    warn!("{} failed on all {} attempts: {}", label, max_attempts, err);
                    return Err(err);
                }
                let delay = policy.delay_for(attempt - 1);
                warn!(
                    "{} failed (attempt {}/{}): {}; retrying in {:?}",
                    label, attempt, max_attempts, err, delay
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}
