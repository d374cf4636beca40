//! # Events Module
//!
//! Order lifecycle events and their publication. Placement produces exactly
//! one `OrderPlacedEvent` per persisted order; delivery runs asynchronously
//! over the pgmq-backed channel with at-least-once semantics, and the
//! placement path never waits on it.

pub mod publisher;

// Re-export key types for convenience
pub use publisher::QueuedEventPublisher;

use serde::{Deserialize, Serialize};

/// Event emitted once an order has been durably persisted
///
/// Serializes with camelCase field names for downstream consumers of the
/// order placement channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPlacedEvent {
    pub order_number: String,
    pub customer_email: String,
    pub customer_first_name: String,
    pub customer_last_name: String,
}

/// Sink for order placement events
///
/// `publish_order_placed` hands the event off and returns immediately. The
/// implementation owns delivery and surfaces failures in logs rather than to
/// the caller; a lost event never fails the order that produced it.
pub trait EventPublisher: Send + Sync {
    fn publish_order_placed(&self, event: OrderPlacedEvent);
}
