//! # Messaging Module
//!
//! PostgreSQL message queue (pgmq) based messaging for order placement
//! events. The "order-placed" channel is a pgmq queue other services consume
//! at least once; producers never wait on delivery.

pub mod errors;
pub mod pgmq_client;

pub use errors::{MessagingError, MessagingResult};
pub use pgmq_client::OrderQueueClient;

use async_trait::async_trait;
use serde::Serialize;

/// Common interface for queue client operations
///
/// Lets the event processor run against the standard pgmq-backed client in
/// production and an in-memory recorder in tests.
#[async_trait]
pub trait QueueClientTrait: Send + Sync {
    /// Create queue if it doesn't exist
    async fn create_queue(&self, queue_name: &str) -> MessagingResult<()>;

    /// Send generic JSON message to queue
    async fn send_json_message<T: Serialize + Send + Sync>(
        &self,
        queue_name: &str,
        message: &T,
    ) -> MessagingResult<i64>;
}
