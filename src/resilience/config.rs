//! Circuit breaker configuration types for the resilience module.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime configuration for a single circuit breaker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CircuitBreakerConfig {
    /// Failures within the sliding window before the circuit opens
    pub failure_threshold: usize,

    /// Width of the sliding window that failures are counted in
    pub failure_window: Duration,

    /// Time to wait in open state before admitting a recovery probe
    pub cooldown: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            failure_window: Duration::from_secs(30),
            cooldown: Duration::from_secs(10),
        }
    }
}
