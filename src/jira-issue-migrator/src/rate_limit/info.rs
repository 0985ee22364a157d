//! Rate limit information.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Remaining core requests below which writes wait for the reset.
pub const LOW_WATERMARK: u32 = 5;

/// Snapshot of the core API quota.
#[derive(Debug, Clone)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,

    /// Unix timestamp when the rate limit resets.
    pub reset: u64,

    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Seconds until the window resets, zero if it already has.
    #[must_use]
    pub fn seconds_until_reset(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        self.reset.saturating_sub(now)
    }

    /// How long to pause before the next write, capped at `max_wait`.
    ///
    /// `None` when enough quota is left or the window already reset.
    #[must_use]
    pub fn pause_before_write(&self, max_wait: Duration) -> Option<Duration> {
        if self.remaining >= LOW_WATERMARK {
            return None;
        }

        match self.seconds_until_reset() {
            0 => None,
            secs => Some(Duration::from_secs(secs).min(max_wait)),
        }
    }
}
