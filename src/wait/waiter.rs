//! Polling loop with timeout and throttle
//!
//! Each call to [`Waiter::wait`] runs the loop from scratch:
//! - check the elapsed time against the timeout (before every poll)
//! - invoke the poll function once
//! - return on `Done` or on error, otherwise sleep for the throttle interval

use crate::error::{Error, Result};
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Timeout used when the caller does not pick one
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15 * 60);

/// Delay between two poll attempts when the caller does not pick one
pub const DEFAULT_THROTTLE: Duration = Duration::from_secs(5);

/// Outcome of a single successful poll
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress<T> {
    /// Not in a terminal state yet, poll again after the throttle
    Pending,
    /// Terminal success carrying the result value
    Done(T),
}

impl<T> Progress<T> {
    /// Check if the poll reported completion
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done(_))
    }

    /// Convert into the done value, if any
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Done(value) => Some(value),
            Self::Pending => None,
        }
    }
}

/// Overrides for waiter timing, usually loaded from configuration
///
/// Unset fields leave the resource-specific defaults untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Maximum total wait time in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Delay between poll attempts in milliseconds
    #[serde(default)]
    pub throttle_ms: Option<u64>,
}

impl WaitConfig {
    /// Timeout override as a duration
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Throttle override as a duration
    pub fn throttle(&self) -> Option<Duration> {
        self.throttle_ms.map(Duration::from_millis)
    }
}

type PollFn<T> = Box<dyn FnMut() -> BoxFuture<'static, Result<Progress<T>>> + Send>;

/// Waits for an asynchronous remote operation to reach a terminal state
///
/// The waiter never mutates remote state, it only observes it through the
/// poll function supplied at construction. Dropping the future returned by
/// [`Waiter::wait`] cancels the wait at its next suspension point.
pub struct Waiter<T> {
    poll: PollFn<T>,
    timeout: Duration,
    throttle: Duration,
    sleep_before_wait: Duration,
}

impl<T: Send + 'static> Waiter<T> {
    /// Create a waiter around a poll function
    ///
    /// Nothing is polled until [`Waiter::wait`] is called.
    pub fn new<F, Fut>(mut poll: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Progress<T>>> + Send + 'static,
    {
        Self {
            poll: Box::new(move || poll().boxed()),
            timeout: DEFAULT_TIMEOUT,
            throttle: DEFAULT_THROTTLE,
            sleep_before_wait: Duration::ZERO,
        }
    }
}

impl<T> Waiter<T> {
    /// Set the maximum total time `wait` may spend
    pub fn set_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /// Set the delay between poll attempts
    pub fn set_throttle(&mut self, throttle: Duration) -> &mut Self {
        self.throttle = throttle;
        self
    }

    /// Set a delay before the first poll attempt (counted against the timeout)
    pub fn set_sleep_before_wait(&mut self, delay: Duration) -> &mut Self {
        self.sleep_before_wait = delay;
        self
    }

    /// Apply the overrides present in `config`
    pub fn apply_config(&mut self, config: &WaitConfig) -> &mut Self {
        if let Some(timeout) = config.timeout() {
            self.timeout = timeout;
        }
        if let Some(throttle) = config.throttle() {
            self.throttle = throttle;
        }
        self
    }

    /// Configured timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Configured throttle
    pub fn throttle(&self) -> Duration {
        self.throttle
    }

    /// Configured delay before the first poll
    pub fn sleep_before_wait(&self) -> Duration {
        self.sleep_before_wait
    }

    /// Poll until the operation is done, the poll function fails, or the
    /// timeout expires
    ///
    /// Poll errors are returned as-is without further attempts. Calling
    /// `wait` again restarts the loop with a fresh clock.
    pub async fn wait(&mut self) -> Result<T> {
        let start = Instant::now();

        if !self.sleep_before_wait.is_zero() {
            tokio::time::sleep(self.sleep_before_wait).await;
        }

        let mut attempt: u32 = 0;
        loop {
            if start.elapsed() >= self.timeout {
                warn!(
                    "Wait timed out after {:?} ({} poll attempts)",
                    self.timeout, attempt
                );
                return Err(Error::wait_timeout(self.timeout));
            }

            attempt += 1;
            debug!("Poll attempt {}", attempt);

            match (self.poll)().await? {
                Progress::Done(value) => {
                    debug!(
                        "Wait finished after {} poll attempts in {:?}",
                        attempt,
                        start.elapsed()
                    );
                    return Ok(value);
                }
                Progress::Pending => tokio::time::sleep(self.throttle).await,
            }
        }
    }
}

impl<T> std::fmt::Debug for Waiter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Waiter")
            .field("timeout", &self.timeout)
            .field("throttle", &self.throttle)
            .field("sleep_before_wait", &self.sleep_before_wait)
            .finish_non_exhaustive()
    }
}
