//! # Order Placement Service
//!
//! Coordinator for the placement workflow. Sequences the availability check,
//! the order insert, and the event publish, and converts every failure shape
//! into the `OrderPlacementError` taxonomy.
//!
//! ## Workflow
//!
//! 1. Ask the availability checker about the requested SKU and quantity.
//!    Anything other than a definite yes aborts before any write.
//! 2. Generate the order number (UUID v4) and insert the order row.
//! 3. Hand an `OrderPlacedEvent` to the publisher. Publication is
//!    fire-and-forget; its outcome never changes the returned result.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::events::{EventPublisher, OrderPlacedEvent};
use crate::inventory::{AvailabilityChecker, InventoryCheckResult};
use crate::models::{NewOrder, Order, OrderRequest};
use crate::store::OrderStore;

use super::errors::OrderPlacementError;

/// Coordinates availability checking, persistence, and event publication
///
/// Collaborators are injected as trait objects: the server binary wires the
/// production implementations, tests substitute mocks.
pub struct OrderPlacementService {
    availability: Arc<dyn AvailabilityChecker>,
    store: Arc<dyn OrderStore>,
    events: Arc<dyn EventPublisher>,
}

impl OrderPlacementService {
    pub fn new(
        availability: Arc<dyn AvailabilityChecker>,
        store: Arc<dyn OrderStore>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            availability,
            store,
            events,
        }
    }

    /// Run the placement workflow for a single request
    pub async fn place_order(
        &self,
        request: OrderRequest,
    ) -> Result<Order, OrderPlacementError> {
        info!(
            sku_code = request.sku_code,
            quantity = request.quantity,
            "Placing order"
        );

        match self
            .availability
            .check_availability(&request.sku_code, request.quantity)
            .await
        {
            InventoryCheckResult::Available => {}
            InventoryCheckResult::Unavailable { sku_code } => {
                warn!(sku_code = sku_code, "Insufficient inventory");
                return Err(OrderPlacementError::insufficient_inventory(sku_code));
            }
            InventoryCheckResult::Indeterminate { cause } => {
                warn!(
                    sku_code = request.sku_code,
                    cause = %cause,
                    "Inventory unavailable"
                );
                return Err(OrderPlacementError::inventory_unavailable(cause));
            }
        }

        let new_order = NewOrder {
            order_number: Uuid::new_v4().to_string(),
            sku_code: request.sku_code.clone(),
            price: request.price,
            quantity: request.quantity,
        };

        let order = match self.store.insert(new_order).await {
            Ok(order) => order,
            Err(e) => {
                error!(
                    sku_code = request.sku_code,
                    error = %e,
                    "Database error while creating order"
                );
                return Err(OrderPlacementError::order_creation_failure(e));
            }
        };

        info!(
            order_id = order.id,
            order_number = order.order_number,
            "Order created successfully"
        );

        let (customer_email, customer_first_name, customer_last_name) =
            match request.user_details {
                Some(details) => (details.email, details.first_name, details.last_name),
                None => (String::new(), String::new(), String::new()),
            };

        let event = OrderPlacedEvent {
            order_number: order.order_number.clone(),
            customer_email,
            customer_first_name,
            customer_last_name,
        };

        info!(order_number = order.order_number, "Sending OrderPlacedEvent");
        self.events.publish_order_placed(event);

        Ok(order)
    }
}
