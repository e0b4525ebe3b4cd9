//! Retry policy and backoff schedule for transient failures.

use std::time::Duration;

use backoff::ExponentialBackoff;

/// Maximum retries per logical operation (4 total attempts).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delay before the first retry.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_secs(1);

/// Multiplier applied to the delay after each retry.
pub const DEFAULT_MULTIPLIER: f64 = 2.0;

/// Ceiling on any single delay.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(4);

/// How a client spaces out retries of one logical operation.
///
/// The defaults produce the schedule 1s, 2s, 4s and then give up.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the original dispatch.
    pub max_retries: u32,
    /// Delay before retry 1.
    pub initial_delay: Duration,
    /// Growth factor between consecutive delays.
    pub multiplier: f64,
    /// Cap applied to every delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            initial_delay: DEFAULT_INITIAL_DELAY,
            multiplier: DEFAULT_MULTIPLIER,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Build the backoff schedule for one logical operation.
    ///
    /// Randomization is disabled so the delays are deterministic, and the
    /// elapsed-time cutoff is disabled because the retry bound is enforced
    /// by the attempt counter, not by wall clock.
    pub fn schedule(&self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_interval: self.initial_delay,
            current_interval: self.initial_delay,
            randomization_factor: 0.0,
            multiplier: self.multiplier,
            max_interval: self.max_delay,
            max_elapsed_time: None,
            ..ExponentialBackoff::default()
        }
    }
}
