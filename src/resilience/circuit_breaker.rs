//! # Circuit Breaker Implementation
//!
//! Provides fault isolation patterns to prevent cascade failures in distributed systems.
//! This implementation follows the classic circuit breaker pattern with three states:
//! Closed (normal operation), Open (failing fast), and Half-Open (testing recovery).
//!
//! Failures are counted within a sliding time window rather than as a lifetime
//! total, so a dependency that fails occasionally over hours never trips the
//! breaker. Recovery admits exactly one probe call at a time; concurrent
//! callers are rejected until the in-flight probe settles.

use crate::resilience::{CircuitBreakerConfig, CircuitBreakerMetrics};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Circuit breaker states representing the current operational mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CircuitState {
    /// Normal operation - all calls are allowed through
    Closed = 0,
    /// Failure mode - all calls fail fast without executing
    Open = 1,
    /// Testing recovery - a single probe call is allowed through
    HalfOpen = 2,
}

impl From<u8> for CircuitState {
    fn from(value: u8) -> Self {
        match value {
            0 => CircuitState::Closed,
            1 => CircuitState::Open,
            2 => CircuitState::HalfOpen,
            _ => CircuitState::Open, // Default to safest state
        }
    }
}

/// Errors that can occur during circuit breaker operation
#[derive(Debug, thiserror::Error)]
pub enum CircuitBreakerError<E> {
    /// Circuit is open, rejecting all calls
    #[error("Circuit breaker is open for {component}")]
    CircuitOpen { component: String },

    /// Operation failed and was recorded
    #[error("Operation failed: {0}")]
    OperationFailed(E),
}

/// How the breaker disposed of an admission request
enum Admission {
    /// Circuit closed, call proceeds normally
    Allowed,
    /// Circuit testing recovery, this call holds the probe slot
    Probe,
    /// Short-circuited without execution
    Rejected,
}

/// Releases the Half-Open probe slot when the probe settles or is cancelled
struct ProbeGuard<'a> {
    slot: &'a AtomicBool,
}

impl Drop for ProbeGuard<'_> {
    fn drop(&mut self) {
        self.slot.store(false, Ordering::Release);
    }
}

/// Core circuit breaker implementation with atomic state management
#[derive(Debug)]
pub struct CircuitBreaker {
    /// Component name for logging and metrics
    name: String,

    /// Current circuit state (atomic for thread safety)
    state: AtomicU8,

    /// Configuration parameters
    config: CircuitBreakerConfig,

    /// Probe slot for Half-Open admission; CAS ensures a single holder
    probe_in_flight: AtomicBool,

    /// Timestamps of recent failures, pruned to the sliding window
    recent_failures: Arc<Mutex<VecDeque<Instant>>>,

    /// Time when circuit was opened (for cooldown calculations)
    opened_at: Arc<Mutex<Option<Instant>>>,

    /// Metrics tracking protected by mutex
    metrics: Arc<Mutex<CircuitBreakerMetrics>>,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with the given name and configuration
    pub fn new(name: String, config: CircuitBreakerConfig) -> Self {
        info!(
            component = %name,
            failure_threshold = config.failure_threshold,
            failure_window_seconds = config.failure_window.as_secs(),
            cooldown_seconds = config.cooldown.as_secs(),
            "🛡️ Circuit breaker initialized"
        );

        Self {
            name,
            state: AtomicU8::new(CircuitState::Closed as u8),
            config,
            probe_in_flight: AtomicBool::new(false),
            recent_failures: Arc::new(Mutex::new(VecDeque::new())),
            opened_at: Arc::new(Mutex::new(None)),
            metrics: Arc::new(Mutex::new(CircuitBreakerMetrics::new())),
        }
    }

    /// Get current circuit state
    pub fn state(&self) -> CircuitState {
        CircuitState::from(self.state.load(Ordering::Acquire))
    }

    /// Execute an operation with circuit breaker protection
    pub async fn call<F, T, E, Fut>(&self, operation: F) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let _probe_guard = match self.admit_call().await {
            Admission::Allowed => None,
            Admission::Probe => Some(ProbeGuard {
                slot: &self.probe_in_flight,
            }),
            Admission::Rejected => {
                self.record_rejection().await;
                return Err(CircuitBreakerError::CircuitOpen {
                    component: self.name.clone(),
                });
            }
        };

        // Execute the operation
        let start_time = Instant::now();
        let result = operation().await;
        let duration = start_time.elapsed();

        // Record the result; the probe guard releases the slot afterwards
        match &result {
            Ok(_) => {
                self.record_success(duration).await;
            }
            Err(_) => {
                self.record_failure(duration).await;
            }
        }

        // Map error type
        result.map_err(CircuitBreakerError::OperationFailed)
    }

    /// Decide whether a call may proceed based on current state
    async fn admit_call(&self) -> Admission {
        match self.state() {
            CircuitState::Closed => Admission::Allowed,
            CircuitState::Open => {
                let cooldown_elapsed = {
                    let opened_at = self.opened_at.lock().await;
                    match *opened_at {
                        Some(opened_time) => opened_time.elapsed() >= self.config.cooldown,
                        None => {
                            // Circuit is open but no timestamp - shouldn't happen
                            warn!(component = %self.name, "Circuit open but no timestamp recorded");
                            true
                        }
                    }
                };

                if cooldown_elapsed {
                    self.transition_to_half_open().await;
                    self.try_acquire_probe()
                } else {
                    Admission::Rejected
                }
            }
            CircuitState::HalfOpen => self.try_acquire_probe(),
        }
    }

    /// Claim the single Half-Open probe slot
    fn try_acquire_probe(&self) -> Admission {
        if self
            .probe_in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Admission::Rejected;
        }

        // The state may have moved between the state read and winning the
        // slot; only a Half-Open circuit runs probes.
        if self.state() == CircuitState::HalfOpen {
            Admission::Probe
        } else {
            self.probe_in_flight.store(false, Ordering::Release);
            Admission::Rejected
        }
    }

    /// Record a successful operation
    async fn record_success(&self, duration: Duration) {
        let mut metrics = self.metrics.lock().await;
        metrics.total_calls += 1;
        metrics.success_count += 1;
        metrics.total_duration += duration;
        drop(metrics);

        debug!(
            component = %self.name,
            duration_ms = duration.as_millis() as u64,
            "🟢 Operation succeeded"
        );

        match self.state() {
            CircuitState::HalfOpen => {
                // Recovery probe succeeded
                self.transition_to_closed().await;
            }
            CircuitState::Closed => {
                // A healthy response clears the failure window
                self.recent_failures.lock().await.clear();
            }
            CircuitState::Open => {
                // A call admitted before the circuit opened finished late
                warn!(component = %self.name, "Success recorded while circuit is open");
            }
        }
    }

    /// Record a failed operation
    async fn record_failure(&self, duration: Duration) {
        let mut metrics = self.metrics.lock().await;
        metrics.total_calls += 1;
        metrics.failure_count += 1;
        metrics.total_duration += duration;
        drop(metrics);

        error!(
            component = %self.name,
            duration_ms = duration.as_millis() as u64,
            "🔴 Operation failed"
        );

        match self.state() {
            CircuitState::Closed => {
                let now = Instant::now();
                let mut recent_failures = self.recent_failures.lock().await;
                recent_failures.push_back(now);
                while let Some(oldest) = recent_failures.front() {
                    if now.duration_since(*oldest) > self.config.failure_window {
                        recent_failures.pop_front();
                    } else {
                        break;
                    }
                }
                let failures_in_window = recent_failures.len();
                drop(recent_failures);

                if failures_in_window >= self.config.failure_threshold {
                    self.transition_to_open().await;
                }
            }
            CircuitState::HalfOpen => {
                // Probe failure reopens immediately and restarts the cooldown
                self.transition_to_open().await;
            }
            CircuitState::Open => {
                // Already open, just record the failure
            }
        }
    }

    /// Record a short-circuited call
    async fn record_rejection(&self) {
        let mut metrics = self.metrics.lock().await;
        metrics.rejected_calls += 1;
        drop(metrics);

        debug!(component = %self.name, "⚡ Call rejected (failing fast)");
    }

    /// Transition to closed state (normal operation)
    async fn transition_to_closed(&self) {
        self.state
            .store(CircuitState::Closed as u8, Ordering::Release);

        // Reset the window and cooldown bookkeeping for the new cycle
        self.recent_failures.lock().await.clear();
        let mut opened_at = self.opened_at.lock().await;
        *opened_at = None;
        drop(opened_at);

        info!(
            component = %self.name,
            "🟢 Circuit breaker closed (recovered)"
        );
    }

    /// Transition to open state (failing fast)
    async fn transition_to_open(&self) {
        self.state.store(CircuitState::Open as u8, Ordering::Release);

        // Record when circuit was opened
        let mut opened_at = self.opened_at.lock().await;
        *opened_at = Some(Instant::now());
        drop(opened_at);

        error!(
            component = %self.name,
            failure_threshold = self.config.failure_threshold,
            cooldown_seconds = self.config.cooldown.as_secs(),
            "🔴 Circuit breaker opened (failing fast)"
        );
    }

    /// Transition to half-open state (testing recovery)
    async fn transition_to_half_open(&self) {
        self.state
            .store(CircuitState::HalfOpen as u8, Ordering::Release);

        info!(
            component = %self.name,
            "🟡 Circuit breaker half-open (admitting one probe)"
        );
    }

    /// Get current metrics snapshot
    pub async fn metrics(&self) -> CircuitBreakerMetrics {
        let metrics = self.metrics.lock().await;
        let mut snapshot = metrics.clone();

        // Add current state information
        snapshot.current_state = self.state();

        // Calculate derived metrics
        if metrics.total_calls > 0 {
            snapshot.failure_rate = metrics.failure_count as f64 / metrics.total_calls as f64;
            snapshot.success_rate = metrics.success_count as f64 / metrics.total_calls as f64;

            if metrics.success_count + metrics.failure_count > 0 {
                snapshot.average_duration =
                    metrics.total_duration / (metrics.success_count + metrics.failure_count) as u32;
            }
        }

        snapshot
    }

    /// Get component name
    pub fn name(&self) -> &str {
        &self.name
    }
}
