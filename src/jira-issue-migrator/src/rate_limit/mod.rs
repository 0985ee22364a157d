//! GitHub quota handling.
//!
//! Every write first looks at the core quota and sleeps through the reset
//! when it is nearly spent. Writes that fail anyway go through
//! [`retry_with_backoff`].

mod backoff;
mod info;

pub use backoff::{retry_with_backoff, RetryPolicy};
pub use info::{RateLimitInfo, LOW_WATERMARK};

use octocrab::Octocrab;
use std::time::Duration;
use tracing::info;

/// Longest single sleep, for both quota resets and backoff (1 hour).
pub const MAX_WAIT_SECS: u64 = 3600;

/// Reads the core API quota (issues, comments).
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let core = octocrab.ratelimit().get().await?.resources.core;

    Ok(RateLimitInfo {
        remaining: u32::try_from(core.remaining).unwrap_or(u32::MAX),
        reset: core.reset,
        limit: u32::try_from(core.limit).unwrap_or(u32::MAX),
    })
}

/// Sleeps through the reset if `info` says the quota is nearly spent.
///
/// Returns true if it slept.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let Some(pause) = info.pause_before_write(Duration::from_secs(MAX_WAIT_SECS)) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        limit = info.limit,
        wait_secs = pause.as_secs(),
        "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(pause).await;
    true
}

/// Checks the core quota and waits for its reset when needed.
///
/// # Errors
///
/// Returns an error if the rate limit check fails.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) -> Result<(), octocrab::Error> {
    let info = check_core_rate_limit(octocrab).await?;
    wait_if_needed(&info).await;
    Ok(())
}
