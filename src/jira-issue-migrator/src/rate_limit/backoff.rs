//! Exponential backoff for GitHub writes.

use super::MAX_WAIT_SECS;
use crate::config::MigrationSettings;
use crate::issues::IssueError;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// How GitHub writes are retried.
///
/// Attempt `n` (zero based) that fails is followed by a sleep of
/// `base_delay * 2^n`, capped at `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Delay after the first failure.
    pub base_delay: Duration,

    /// Longest single sleep.
    pub max_delay: Duration,

    /// Total attempts before giving up; `None` retries forever.
    pub max_attempts: Option<u32>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            base_delay: Duration::from_secs(60),
            max_delay: Duration::from_secs(MAX_WAIT_SECS),
            max_attempts: None,
        }
    }
}

impl RetryPolicy {
    /// Builds the policy described by migration settings.
    #[must_use]
    pub fn from_settings(settings: &MigrationSettings) -> Self {
        Self {
            base_delay: Duration::from_secs(settings.backoff_base_secs),
            max_attempts: settings.max_attempts,
            ..Self::default()
        }
    }

    /// A policy that retries immediately, up to `max_attempts` times.
    #[must_use]
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
            max_attempts: Some(max_attempts),
        }
    }

    /// Sleep after the failed attempt `attempt` (zero based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }

    fn exhausted(&self, attempts: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempts >= max)
    }
}

/// Runs `operation` until it succeeds or `policy` runs out of attempts.
///
/// # Errors
///
/// Returns [`IssueError::RetriesExhausted`] carrying the last failure.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    action: &str,
    mut operation: F,
) -> Result<T, IssueError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, IssueError>>,
{
    let mut attempt = 0;

    loop {
        let error = match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        let attempts = attempt + 1;
        if policy.exhausted(attempts) {
            warn!(action, attempts, error = %error, "Giving up");
            return Err(IssueError::RetriesExhausted {
                attempts,
                last_error: error.to_string(),
            });
        }

        let delay = policy.delay_for(attempt);
        if error.is_rate_limited() {
            info!(action, backoff_secs = delay.as_secs(), "Getting rate limited, sleeping");
        } else {
            warn!(action, error = %error, backoff_secs = delay.as_secs(), "Request failed, sleeping before retrying");
        }

        tokio::time::sleep(delay).await;
        attempt = attempts;
    }
}
