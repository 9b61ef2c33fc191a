//! Client-side request pacing
//!
//! One governor token bucket per [`HttpClient`](super::HttpClient). Waiters
//! built on the same service share the client, so their polls draw from the
//! same bucket.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter as Governor};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

/// Token bucket settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimiterConfig {
    /// Sustained requests per second
    pub requests_per_second: u32,
    /// Requests that may be sent back to back before pacing starts
    pub burst_size: u32,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::new(10, 10)
    }
}

impl RateLimiterConfig {
    pub fn new(requests_per_second: u32, burst_size: u32) -> Self {
        Self {
            requests_per_second,
            burst_size,
        }
    }

    /// Quota with zero values clamped to one
    fn quota(&self) -> Quota {
        let per_second = NonZeroU32::new(self.requests_per_second).unwrap_or(NonZeroU32::MIN);
        let burst = NonZeroU32::new(self.burst_size).unwrap_or(NonZeroU32::MIN);
        Quota::per_second(per_second).allow_burst(burst)
    }
}

pub(crate) struct RateLimiter(DefaultDirectRateLimiter);

impl RateLimiter {
    pub(crate) fn new(config: &RateLimiterConfig) -> Self {
        Self(Governor::direct(config.quota()))
    }

    /// Suspend until the bucket has a token
    pub(crate) async fn acquire(&self) {
        self.0.until_ready().await;
    }
}
