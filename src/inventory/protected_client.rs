//! # Circuit Breaker Protected Inventory Client
//!
//! Wraps the wire-level inventory client with the availability policy: every
//! attempt is admitted through the shared circuit breaker, transient faults
//! are retried with exponential backoff, and whatever happens the caller
//! receives a typed `InventoryCheckResult`.
//!
//! Outcome accounting rules:
//!
//! - A "not in stock" answer is a healthy response. It counts as breaker
//!   success and is never retried.
//! - A success response without a verdict (`data` absent) is also breaker
//!   success: the transport worked, the upstream simply declined to answer.
//!   It is not retried; the upstream already fell back once.
//! - Timeouts, connection failures, decode failures, and 5xx statuses count
//!   as breaker failures and are retried while attempts remain.
//! - Client-error statuses count as breaker failures but are not retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigurationError, InventoryClientConfig};
use crate::inventory::{
    AvailabilityChecker, IndeterminateCause, InventoryApiError, InventoryCheckResult,
    InventoryServiceClient,
};
use crate::resilience::{CircuitBreakerError, CircuitBreakerManager};

/// Component name shared by every availability breaker lookup
const COMPONENT_NAME: &str = "inventory";

/// Inventory client with circuit breaker and retry protection
#[derive(Debug, Clone)]
pub struct ProtectedInventoryClient {
    /// Underlying wire client
    client: InventoryServiceClient,

    /// Circuit breaker manager for fault tolerance
    circuit_manager: Arc<CircuitBreakerManager>,

    /// Retry and timeout policy
    config: InventoryClientConfig,
}

impl ProtectedInventoryClient {
    /// Create a new protected inventory client
    pub fn new(
        config: &InventoryClientConfig,
        circuit_manager: Arc<CircuitBreakerManager>,
    ) -> Result<Self, ConfigurationError> {
        let client = InventoryServiceClient::new(config)?;

        Ok(Self {
            client,
            circuit_manager,
            config: config.clone(),
        })
    }

    /// Backoff before the next attempt: doubles per attempt, capped
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        let delay = self.config.retry_delay().saturating_mul(1u32 << exponent);
        delay.min(self.config.max_retry_delay())
    }

    /// One breaker-accounted attempt against the wire client
    async fn attempt_check(
        &self,
        sku_code: &str,
        quantity: i32,
    ) -> Result<Option<bool>, CircuitBreakerError<InventoryApiError>> {
        if !self.circuit_manager.is_enabled() {
            return self
                .client
                .fetch_availability(sku_code, quantity)
                .await
                .map_err(CircuitBreakerError::OperationFailed);
        }

        let circuit_breaker = self
            .circuit_manager
            .get_circuit_breaker(COMPONENT_NAME)
            .await;

        circuit_breaker
            .call(|| async { self.client.fetch_availability(sku_code, quantity).await })
            .await
    }
}

#[async_trait]
impl AvailabilityChecker for ProtectedInventoryClient {
    async fn check_availability(&self, sku_code: &str, quantity: i32) -> InventoryCheckResult {
        let mut attempt: u32 = 1;

        loop {
            match self.attempt_check(sku_code, quantity).await {
                Ok(Some(true)) => {
                    debug!(
                        sku_code = %sku_code,
                        quantity = quantity,
                        attempt = attempt,
                        "Inventory confirmed availability"
                    );
                    return InventoryCheckResult::Available;
                }
                Ok(Some(false)) => {
                    info!(
                        sku_code = %sku_code,
                        quantity = quantity,
                        "Inventory reported insufficient stock"
                    );
                    return InventoryCheckResult::Unavailable {
                        sku_code: sku_code.to_string(),
                    };
                }
                Ok(None) => {
                    warn!(
                        sku_code = %sku_code,
                        "Inventory answered without a verdict (upstream fallback)"
                    );
                    return InventoryCheckResult::Indeterminate {
                        cause: IndeterminateCause::MissingBody,
                    };
                }
                Err(CircuitBreakerError::CircuitOpen { component }) => {
                    warn!(
                        component = %component,
                        sku_code = %sku_code,
                        "Availability check short-circuited by open circuit"
                    );
                    return InventoryCheckResult::Indeterminate {
                        cause: IndeterminateCause::CircuitOpen,
                    };
                }
                Err(CircuitBreakerError::OperationFailed(api_error)) => {
                    if let InventoryApiError::UpstreamStatus { status } = api_error {
                        if !api_error.is_transient() {
                            error!(
                                status = status,
                                sku_code = %sku_code,
                                "Inventory service rejected availability request"
                            );
                            return InventoryCheckResult::Indeterminate {
                                cause: IndeterminateCause::UpstreamRejected { status },
                            };
                        }
                    }

                    if attempt >= self.config.max_attempts {
                        error!(
                            attempts = attempt,
                            max_attempts = self.config.max_attempts,
                            sku_code = %sku_code,
                            error = %api_error,
                            "Exhausted all retries for availability check"
                        );
                        return InventoryCheckResult::Indeterminate {
                            cause: IndeterminateCause::RetriesExhausted {
                                attempts: attempt,
                                last_error: api_error.to_string(),
                            },
                        };
                    }

                    let delay = self.backoff_delay(attempt);
                    warn!(
                        error = %api_error,
                        retry = attempt,
                        max_attempts = self.config.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "Transient inventory failure, will retry"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
