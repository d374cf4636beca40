//! # Inventory Availability Checking
//!
//! Client stack for the remote inventory service. The orchestration layer
//! only sees the `AvailabilityChecker` trait and its typed
//! `InventoryCheckResult`; transport faults, HTTP statuses, retry policy,
//! and circuit breaker bookkeeping all stay inside this module.
//!
//! ## Architecture
//!
//! - **`InventoryServiceClient`**: one HTTP request per call, no policy
//! - **`ProtectedInventoryClient`**: wraps the wire client with the circuit
//!   breaker and retry policy and synthesizes typed fallbacks
//! - **`InventoryCheckResult`**: the only vocabulary callers ever handle

pub mod client;
pub mod protected_client;

use async_trait::async_trait;

pub use client::{InventoryApiError, InventoryServiceClient};
pub use protected_client::ProtectedInventoryClient;

/// Outcome of one availability check as seen by the placement workflow.
///
/// `Indeterminate` means the service could not produce a trustworthy answer;
/// it is explicitly distinct from `Unavailable`, which is the service
/// answering "no" in good health.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryCheckResult {
    /// Requested quantity is in stock
    Available,
    /// Service answered: not enough stock for this SKU
    Unavailable { sku_code: String },
    /// No trustworthy answer could be obtained
    Indeterminate { cause: IndeterminateCause },
}

/// Why an availability check produced no trustworthy answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndeterminateCause {
    /// Circuit breaker short-circuited the check; no request was made
    CircuitOpen,
    /// A success response arrived without an availability verdict in its body
    MissingBody,
    /// The service answered with a non-success status that retrying cannot fix
    UpstreamRejected { status: u16 },
    /// Every allowed attempt failed with a transient fault
    RetriesExhausted { attempts: u32, last_error: String },
}

impl std::fmt::Display for IndeterminateCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndeterminateCause::CircuitOpen => write!(f, "circuit breaker open"),
            IndeterminateCause::MissingBody => {
                write!(f, "response carried no availability verdict")
            }
            IndeterminateCause::UpstreamRejected { status } => {
                write!(f, "inventory service rejected the request (HTTP {status})")
            }
            IndeterminateCause::RetriesExhausted {
                attempts,
                last_error,
            } => {
                write!(f, "all {attempts} attempts failed, last error: {last_error}")
            }
        }
    }
}

/// Availability lookup seam used by the order placement workflow.
///
/// Implementations must always resolve to a typed result; transport errors
/// surface as `Indeterminate`, never as a raw error the caller has to
/// interpret.
#[async_trait]
pub trait AvailabilityChecker: Send + Sync {
    /// Check whether `quantity` units of `sku_code` are in stock
    async fn check_availability(&self, sku_code: &str, quantity: i32) -> InventoryCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indeterminate_causes_render_for_logs() {
        assert_eq!(
            IndeterminateCause::CircuitOpen.to_string(),
            "circuit breaker open"
        );
        assert_eq!(
            IndeterminateCause::UpstreamRejected { status: 404 }.to_string(),
            "inventory service rejected the request (HTTP 404)"
        );
        let exhausted = IndeterminateCause::RetriesExhausted {
            attempts: 3,
            last_error: "inventory request timed out".to_string(),
        };
        assert!(exhausted.to_string().contains("3 attempts"));
    }
}
