//! # Messaging Error Types
//!
//! Structured error handling for queue operations using thiserror instead of
//! `Box<dyn Error>` patterns.

use thiserror::Error;

/// Messaging error types for queue connection and publishing
#[derive(Error, Debug)]
pub enum MessagingError {
    #[error("Database connection error: {message}")]
    DatabaseConnection { message: String },

    #[error("Queue operation failed: {queue_name}: {operation}: {message}")]
    QueueOperation {
        queue_name: String,
        operation: String,
        message: String,
    },

    #[error("Message serialization error: {message}")]
    MessageSerialization { message: String },
}

impl MessagingError {
    /// Create a database connection error
    pub fn database_connection(message: impl Into<String>) -> Self {
        Self::DatabaseConnection {
            message: message.into(),
        }
    }

    /// Create a queue operation error
    pub fn queue_operation(
        queue_name: impl Into<String>,
        operation: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::QueueOperation {
            queue_name: queue_name.into(),
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Create a message serialization error
    pub fn message_serialization(message: impl Into<String>) -> Self {
        Self::MessageSerialization {
            message: message.into(),
        }
    }
}

/// Conversion from serde_json::Error to MessagingError
impl From<serde_json::Error> for MessagingError {
    fn from(err: serde_json::Error) -> Self {
        MessagingError::message_serialization(err.to_string())
    }
}

/// Result type alias for messaging operations
pub type MessagingResult<T> = Result<T, MessagingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messaging_error_creation() {
        let db_err = MessagingError::database_connection("Connection failed");
        assert!(matches!(db_err, MessagingError::DatabaseConnection { .. }));

        let queue_err = MessagingError::queue_operation("order_placed", "send", "Failed to send");
        assert!(matches!(queue_err, MessagingError::QueueOperation { .. }));
    }

    #[test]
    fn test_error_display() {
        let queue_err = MessagingError::queue_operation("order_placed", "send", "Send failed");
        let display_str = format!("{queue_err}");
        assert!(display_str.contains("Queue operation failed"));
        assert!(display_str.contains("order_placed"));
        assert!(display_str.contains("send"));
        assert!(display_str.contains("Send failed"));
    }

    #[test]
    fn test_serde_failures_convert_to_serialization_errors() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{ not json").unwrap_err();
        let err = MessagingError::from(serde_err);
        assert!(matches!(err, MessagingError::MessageSerialization { .. }));
        assert!(format!("{err}").contains("Message serialization error"));
    }
}
