//! # Order Placement Errors
//!
//! The single taxonomy every placement failure collapses into. Callers
//! branch on these variants; transport and storage details never leak past
//! this boundary.

use thiserror::Error;

use crate::inventory::IndeterminateCause;
use crate::store::StoreError;

/// Failure modes of the order placement workflow
///
/// Display strings are part of the public API contract and are returned to
/// clients verbatim.
#[derive(Debug, Error)]
pub enum OrderPlacementError {
    /// The inventory service answered: not enough stock
    #[error("Product with sku code {sku_code} is not in stock")]
    InsufficientInventory { sku_code: String },

    /// Stock could not be determined (outage, exhausted retries, open circuit)
    #[error("Inventory service unavailable")]
    InventoryUnavailable { cause: IndeterminateCause },

    /// The order row could not be persisted
    #[error("Unable to create order at this time")]
    OrderCreationFailure {
        #[source]
        source: StoreError,
    },
}

impl OrderPlacementError {
    /// Create an insufficient inventory error
    pub fn insufficient_inventory(sku_code: impl Into<String>) -> Self {
        Self::InsufficientInventory {
            sku_code: sku_code.into(),
        }
    }

    /// Create an inventory unavailable error
    pub fn inventory_unavailable(cause: IndeterminateCause) -> Self {
        Self::InventoryUnavailable { cause }
    }

    /// Create an order creation failure
    pub fn order_creation_failure(source: StoreError) -> Self {
        Self::OrderCreationFailure { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_match_api_contract() {
        let insufficient = OrderPlacementError::insufficient_inventory("iphone_15");
        assert_eq!(
            insufficient.to_string(),
            "Product with sku code iphone_15 is not in stock"
        );

        let unavailable =
            OrderPlacementError::inventory_unavailable(IndeterminateCause::CircuitOpen);
        assert_eq!(unavailable.to_string(), "Inventory service unavailable");

        let creation =
            OrderPlacementError::order_creation_failure(StoreError::new("connection reset"));
        assert_eq!(creation.to_string(), "Unable to create order at this time");
    }

    #[test]
    fn creation_failure_preserves_the_store_error_as_source() {
        use std::error::Error;

        let creation =
            OrderPlacementError::order_creation_failure(StoreError::new("connection reset"));
        let source = creation.source().expect("store error should be the source");
        assert!(source.to_string().contains("connection reset"));
    }
}
