//! # Web API Response Types
//!
//! The response envelope shared by all business endpoints and the error
//! types that map onto it. Errors implement Axum's `IntoResponse`, so
//! handlers bubble them up with `?` and every outcome keeps the same
//! envelope shape.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::Order;
use crate::orchestration::OrderPlacementError;

/// Result alias for web handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Standard response envelope
///
/// `data` and `error` are mutually exclusive and the absent one is omitted
/// from the serialized body.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub timestamp: String,
    pub status: u16,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

/// Error payload inside the response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
    #[serde(rename = "fieldErrors", skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
}

/// Single field-level validation failure
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl<T> ApiResponse<T> {
    /// Build a success envelope around `data`
    pub fn success(status: StatusCode, path: impl Into<String>, data: T) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            path: path.into(),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    /// Build an error envelope with no data payload
    pub fn error(status: StatusCode, path: impl Into<String>, error: ApiErrorBody) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            status: status.as_u16(),
            path: path.into(),
            data: None,
            error: Some(error),
        }
    }
}

/// Created-order payload for `POST /api/order` responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub order_number: String,
    pub sku_code: String,
    /// Crosses the wire as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i32,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            order_number: order.order_number,
            sku_code: order.sku_code,
            price: order.price,
            quantity: order.quantity,
        }
    }
}

/// Web API error carrying the request path for the response envelope
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ApiError {
    path: String,
    kind: ApiErrorKind,
}

/// Error categories with HTTP status code mappings
#[derive(Debug, Error)]
pub enum ApiErrorKind {
    #[error(transparent)]
    Placement(OrderPlacementError),

    #[error("Validation failed")]
    ValidationFailed { field_errors: Vec<FieldError> },

    #[error("Malformed JSON request")]
    MalformedJson,
}

impl ApiError {
    /// Wrap a placement workflow failure
    pub fn placement(path: impl Into<String>, error: OrderPlacementError) -> Self {
        Self {
            path: path.into(),
            kind: ApiErrorKind::Placement(error),
        }
    }

    /// Create a validation error with field-level details
    pub fn validation_failed(path: impl Into<String>, field_errors: Vec<FieldError>) -> Self {
        Self {
            path: path.into(),
            kind: ApiErrorKind::ValidationFailed { field_errors },
        }
    }

    /// Create a malformed JSON body error
    pub fn malformed_json(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ApiErrorKind::MalformedJson,
        }
    }

    /// HTTP status this error renders as
    pub fn status_code(&self) -> StatusCode {
        match &self.kind {
            ApiErrorKind::Placement(OrderPlacementError::InsufficientInventory { .. }) => {
                StatusCode::CONFLICT
            }
            ApiErrorKind::Placement(OrderPlacementError::InventoryUnavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiErrorKind::Placement(OrderPlacementError::OrderCreationFailure { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiErrorKind::ValidationFailed { .. } | ApiErrorKind::MalformedJson => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.kind.to_string();

        match &self.kind {
            ApiErrorKind::Placement(OrderPlacementError::InsufficientInventory { .. }) => {
                warn!(path = self.path, message = message, "Insufficient inventory");
            }
            ApiErrorKind::Placement(OrderPlacementError::InventoryUnavailable { cause }) => {
                error!(
                    path = self.path,
                    cause = %cause,
                    "Inventory service unavailable"
                );
            }
            ApiErrorKind::Placement(OrderPlacementError::OrderCreationFailure { source }) => {
                error!(path = self.path, error = %source, "Order creation failed");
            }
            ApiErrorKind::ValidationFailed { field_errors } => {
                warn!(
                    path = self.path,
                    field_errors = ?field_errors,
                    "Validation failed"
                );
            }
            ApiErrorKind::MalformedJson => {
                warn!(path = self.path, "Malformed JSON request");
            }
        }

        let field_errors = match self.kind {
            ApiErrorKind::ValidationFailed { field_errors } => Some(field_errors),
            _ => None,
        };

        let envelope = ApiResponse::error(
            status,
            self.path,
            ApiErrorBody {
                message,
                field_errors,
            },
        );

        (status, Json(envelope)).into_response()
    }
}
