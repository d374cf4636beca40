//! Shared test doubles for the order placement workflow.
//!
//! Mocks record their interactions so tests can assert on side effects
//! (what was inserted, what was published) as well as on return values.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;

use order_core::events::{EventPublisher, OrderPlacedEvent};
use order_core::inventory::{AvailabilityChecker, IndeterminateCause, InventoryCheckResult};
use order_core::models::{NewOrder, Order, OrderRequest, UserDetails};
use order_core::store::{OrderStore, StoreError};

/// Scripted outcome for the availability mock
#[derive(Clone)]
pub enum ScriptedAvailability {
    Available,
    OutOfStock,
    Indeterminate(IndeterminateCause),
}

/// Mock AvailabilityChecker with a scripted outcome and recorded calls
pub struct MockAvailabilityChecker {
    outcome: ScriptedAvailability,
    pub calls: Arc<tokio::sync::Mutex<Vec<(String, i32)>>>,
}

impl MockAvailabilityChecker {
    pub fn available() -> Self {
        Self::with_outcome(ScriptedAvailability::Available)
    }

    pub fn out_of_stock() -> Self {
        Self::with_outcome(ScriptedAvailability::OutOfStock)
    }

    pub fn unreachable(cause: IndeterminateCause) -> Self {
        Self::with_outcome(ScriptedAvailability::Indeterminate(cause))
    }

    fn with_outcome(outcome: ScriptedAvailability) -> Self {
        Self {
            outcome,
            calls: Arc::new(tokio::sync::Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl AvailabilityChecker for MockAvailabilityChecker {
    async fn check_availability(&self, sku_code: &str, quantity: i32) -> InventoryCheckResult {
        let mut calls = self.calls.lock().await;
        calls.push((sku_code.to_string(), quantity));

        match &self.outcome {
            ScriptedAvailability::Available => InventoryCheckResult::Available,
            ScriptedAvailability::OutOfStock => InventoryCheckResult::Unavailable {
                sku_code: sku_code.to_string(),
            },
            ScriptedAvailability::Indeterminate(cause) => InventoryCheckResult::Indeterminate {
                cause: cause.clone(),
            },
        }
    }
}

/// Mock OrderStore assigning sequential row ids in memory
pub struct MockOrderStore {
    pub inserted: Arc<tokio::sync::Mutex<Vec<NewOrder>>>,
    pub should_fail_insert: bool,
}

impl MockOrderStore {
    pub fn new() -> Self {
        Self {
            inserted: Arc::new(tokio::sync::Mutex::new(Vec::new())),
            should_fail_insert: false,
        }
    }

    pub fn with_insert_failure() -> Self {
        Self {
            inserted: Arc::new(tokio::sync::Mutex::new(Vec::new())),
            should_fail_insert: true,
        }
    }
}

#[async_trait]
impl OrderStore for MockOrderStore {
    async fn insert(&self, new_order: NewOrder) -> Result<Order, StoreError> {
        if self.should_fail_insert {
            return Err(StoreError::new("mock insert failure"));
        }

        let mut inserted = self.inserted.lock().await;
        inserted.push(new_order.clone());
        Ok(Order {
            id: inserted.len() as i64,
            order_number: new_order.order_number,
            sku_code: new_order.sku_code,
            price: new_order.price,
            quantity: new_order.quantity,
        })
    }
}

/// Mock EventPublisher recording published events
#[derive(Default)]
pub struct MockEventPublisher {
    pub published: Arc<parking_lot::Mutex<Vec<OrderPlacedEvent>>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventPublisher for MockEventPublisher {
    fn publish_order_placed(&self, event: OrderPlacedEvent) {
        self.published.lock().push(event);
    }
}

/// Order request for the standard test SKU
pub fn sample_request(sku_code: &str, quantity: i32) -> OrderRequest {
    OrderRequest {
        sku_code: sku_code.to_string(),
        price: Decimal::from(100),
        quantity,
        user_details: Some(UserDetails {
            email: "jane@example.com".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        }),
    }
}
