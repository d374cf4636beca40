//! # PostgreSQL Message Queue Client (pgmq-rs)
//!
//! Thin wrapper over the pgmq-rs crate for the order placement event channel.
//! The service only produces; consuming and redelivery are the transport's
//! and the subscribers' concern.

use pgmq::PGMQueue;
use tracing::{debug, info};

use super::errors::MessagingError;

/// pgmq-rs based message queue client
#[derive(Debug, Clone)]
pub struct OrderQueueClient {
    pgmq: PGMQueue,
}

impl OrderQueueClient {
    /// Create new pgmq client using connection string
    pub async fn new(database_url: &str) -> Result<Self, MessagingError> {
        info!("🚀 Connecting to pgmq using pgmq-rs crate");

        let pgmq = PGMQueue::new(database_url.to_string())
            .await
            .map_err(|e| MessagingError::database_connection(e.to_string()))?;

        info!("✅ Connected to pgmq using pgmq-rs");
        Ok(Self { pgmq })
    }

    /// Create new pgmq client using existing connection pool
    pub async fn new_with_pool(pool: sqlx::PgPool) -> Self {
        info!("🚀 Creating pgmq client with shared connection pool");

        let pgmq = PGMQueue::new_with_pool(pool).await;

        info!("✅ pgmq client created with shared pool");
        Self { pgmq }
    }

    /// Create queue if it doesn't exist
    pub async fn create_queue(&self, queue_name: &str) -> Result<(), MessagingError> {
        debug!("📋 Creating queue: {}", queue_name);

        self.pgmq.create(queue_name).await.map_err(|e| {
            MessagingError::queue_operation(queue_name, "create", e.to_string())
        })?;

        info!("✅ Queue created: {}", queue_name);
        Ok(())
    }

    /// Send generic JSON message to queue, returning the assigned message id
    pub async fn send_json_message<T: serde::Serialize>(
        &self,
        queue_name: &str,
        message: &T,
    ) -> Result<i64, MessagingError> {
        debug!("📤 Sending JSON message to queue: {}", queue_name);

        let serialized = serde_json::to_value(message)?;
        let message_id = self
            .pgmq
            .send(queue_name, &serialized)
            .await
            .map_err(|e| MessagingError::queue_operation(queue_name, "send", e.to_string()))?;

        debug!(
            "✅ JSON message sent to queue: {} with ID: {}",
            queue_name, message_id
        );
        Ok(message_id)
    }
}

/// Implement QueueClientTrait for the standard OrderQueueClient
#[async_trait::async_trait]
impl crate::messaging::QueueClientTrait for OrderQueueClient {
    async fn create_queue(&self, queue_name: &str) -> Result<(), MessagingError> {
        self.create_queue(queue_name).await
    }

    async fn send_json_message<T: serde::Serialize + Send + Sync>(
        &self,
        queue_name: &str,
        message: &T,
    ) -> Result<i64, MessagingError> {
        self.send_json_message(queue_name, message).await
    }
}
