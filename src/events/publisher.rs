//! # Queued Event Publisher
//!
//! Fire-and-forget publication of `OrderPlacedEvent`s. Submission pushes the
//! event onto an unbounded in-process queue; a background processor drains
//! the queue and sends each event to the pgmq channel, logging the assigned
//! message id on success and the failure cause otherwise.

use tokio::sync::mpsc;
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::messaging::QueueClientTrait;

use super::{EventPublisher, OrderPlacedEvent};

/// Asynchronous publisher backed by an in-process queue and a pgmq channel
#[derive(Debug)]
pub struct QueuedEventPublisher {
    /// Event queue for async processing
    event_queue: mpsc::UnboundedSender<OrderPlacedEvent>,
    /// Correlation ID for this publisher instance
    correlation_id: String,
}

impl QueuedEventPublisher {
    /// Create a publisher delivering to `queue_name` through `queue_client`
    pub fn new<C>(queue_client: C, queue_name: impl Into<String>) -> Self
    where
        C: QueueClientTrait + 'static,
    {
        let (event_queue, event_queue_rx) = mpsc::unbounded_channel();
        let correlation_id = format!("pub_{}", &Uuid::new_v4().to_string()[..8]);

        let publisher = Self {
            event_queue,
            correlation_id,
        };

        // Start background event processing
        publisher.start_event_processor(queue_client, queue_name.into(), event_queue_rx);

        info!(
            correlation_id = publisher.correlation_id,
            "QueuedEventPublisher initialized"
        );

        publisher
    }

    /// Start background event processor
    fn start_event_processor<C>(
        &self,
        queue_client: C,
        queue_name: String,
        mut event_queue_rx: mpsc::UnboundedReceiver<OrderPlacedEvent>,
    ) where
        C: QueueClientTrait + 'static,
    {
        let correlation_id = self.correlation_id.clone();

        tokio::spawn(async move {
            while let Some(event) = event_queue_rx.recv().await {
                match queue_client.send_json_message(&queue_name, &event).await {
                    Ok(message_id) => {
                        info!(
                            correlation_id = correlation_id,
                            order_number = event.order_number,
                            queue_name = queue_name,
                            message_id = message_id,
                            "Successfully sent OrderPlacedEvent"
                        );
                    }
                    Err(e) => {
                        error!(
                            correlation_id = correlation_id,
                            order_number = event.order_number,
                            queue_name = queue_name,
                            error = %e,
                            "Failed to send OrderPlacedEvent"
                        );
                    }
                }
            }

            debug!(
                correlation_id = correlation_id,
                "Event processor shutting down"
            );
        });
    }
}

impl EventPublisher for QueuedEventPublisher {
    fn publish_order_placed(&self, event: OrderPlacedEvent) {
        debug!(
            order_number = event.order_number,
            "Queueing OrderPlacedEvent for delivery"
        );

        // Receiver only disappears when the runtime tears the processor down
        if self.event_queue.send(event).is_err() {
            error!(
                correlation_id = self.correlation_id,
                "Event processor stopped, OrderPlacedEvent dropped"
            );
        }
    }
}
