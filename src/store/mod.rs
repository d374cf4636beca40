//! # Order Store
//!
//! Persistence seam for the placement workflow. The orchestrator talks to the
//! `OrderStore` trait only; the Postgres implementation lives behind it so
//! tests can substitute in-memory fakes and failure injectors.
//!
//! Every backend failure surfaces as a single uniform `StoreError`. The
//! workflow treats persistence as atomic per order and never retries a
//! failed insert.

use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, error};

use crate::models::{NewOrder, Order};

/// Uniform error for order persistence failures
#[derive(Debug, Error)]
#[error("Order store failure: {message}")]
pub struct StoreError {
    pub message: String,
    #[source]
    source: Option<sqlx::Error>,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> Self {
        Self {
            message: error.to_string(),
            source: Some(error),
        }
    }
}

/// Transactional persistence contract for placed orders
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order, returning the stored row with its assigned id.
    /// The write either fully succeeds or leaves no partial record.
    async fn insert(&self, new_order: NewOrder) -> Result<Order, StoreError>;
}

/// PostgreSQL-backed order store
#[derive(Debug, Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn insert(&self, new_order: NewOrder) -> Result<Order, StoreError> {
        let order_number = new_order.order_number.clone();

        match Order::create(&self.pool, new_order).await {
            Ok(order) => {
                debug!(
                    order_id = order.id,
                    order_number = %order.order_number,
                    "💾 Order persisted"
                );
                Ok(order)
            }
            Err(e) => {
                error!(
                    order_number = %order_number,
                    error = %e,
                    "💾 Order insert failed"
                );
                Err(StoreError::from(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_preserves_message() {
        let err = StoreError::new("connection refused");
        assert_eq!(err.to_string(), "Order store failure: connection refused");
    }
}
