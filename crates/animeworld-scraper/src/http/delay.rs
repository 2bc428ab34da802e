//! Randomized pre-request delay.
//!
//! Waits a uniformly random duration within configured bounds before each
//! request. It is a fixed heuristic with no adaptive behaviour.

use rand::Rng;
use shared::DelayConfig;
use std::time::Duration;
use tokio::time::sleep;

/// Pre-request delay with inclusive millisecond bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestDelay {
    /// Lower bound in milliseconds
    min_ms: u64,
    /// Upper bound in milliseconds
    max_ms: u64,
}

impl RequestDelay {
    /// Create a new delay. Reversed bounds are swapped.
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        let (min_ms, max_ms) = if min_ms > max_ms {
            (max_ms, min_ms)
        } else {
            (min_ms, max_ms)
        };
        Self { min_ms, max_ms }
    }

    /// A delay that never waits
    pub fn disabled() -> Self {
        Self::new(0, 0)
    }

    pub fn is_enabled(&self) -> bool {
        self.max_ms > 0
    }

    /// Pick the next wait duration
    pub fn sample(&self) -> Duration {
        if !self.is_enabled() {
            return Duration::ZERO;
        }
        let ms = rand::thread_rng().gen_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }

    /// Wait before issuing a request
    pub async fn wait(&self) {
        let wait_time = self.sample();
        if wait_time.is_zero() {
            return;
        }

        tracing::debug!(
            wait_ms = wait_time.as_millis() as u64,
            "Delaying request"
        );
        sleep(wait_time).await;
    }
}

impl Default for RequestDelay {
    fn default() -> Self {
        Self::disabled()
    }
}

impl From<DelayConfig> for RequestDelay {
    fn from(config: DelayConfig) -> Self {
        Self::new(config.min_ms, config.max_ms)
    }
}
