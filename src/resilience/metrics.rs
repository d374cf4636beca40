//! Circuit breaker metrics collection.
//!
//! Counters are accumulated under the breaker's internal lock; `metrics()`
//! snapshots add derived rates so callers never read half-updated state.

use std::time::Duration;

use super::circuit_breaker::CircuitState;

/// Metrics snapshot for a single circuit breaker
#[derive(Debug, Clone)]
pub struct CircuitBreakerMetrics {
    /// Total operations attempted through this breaker (executed, not rejected)
    pub total_calls: u64,

    /// Operations that completed successfully
    pub success_count: u64,

    /// Operations that failed
    pub failure_count: u64,

    /// Calls rejected without execution (open circuit or occupied probe slot)
    pub rejected_calls: u64,

    /// Accumulated execution time of completed operations
    pub total_duration: Duration,

    /// State at snapshot time
    pub current_state: CircuitState,

    /// Derived: failure_count / total_calls
    pub failure_rate: f64,

    /// Derived: success_count / total_calls
    pub success_rate: f64,

    /// Derived: mean duration of completed operations
    pub average_duration: Duration,
}

impl CircuitBreakerMetrics {
    pub fn new() -> Self {
        Self {
            total_calls: 0,
            success_count: 0,
            failure_count: 0,
            rejected_calls: 0,
            total_duration: Duration::ZERO,
            current_state: CircuitState::Closed,
            failure_rate: 0.0,
            success_rate: 0.0,
            average_duration: Duration::ZERO,
        }
    }
}

impl Default for CircuitBreakerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
