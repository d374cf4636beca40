//! # Order Placement Handlers
//!
//! HTTP handler for `POST /api/order`. Parses and validates the request,
//! runs the placement workflow, and wraps the outcome in the standard
//! response envelope.

use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::Json;
use rust_decimal::Decimal;
use tracing::info;

use crate::models::OrderRequest;
use crate::web::response_types::{ApiError, ApiResponse, ApiResult, FieldError, OrderResponse};
use crate::web::state::AppState;

/// Handle `POST /api/order`
///
/// The `Json` extractor is taken as a `Result` so body rejections render as
/// the enveloped "Malformed JSON request" response instead of Axum's
/// default plain-text rejection.
pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ApiResponse<OrderResponse>>)> {
    let path = uri.path().to_string();

    let Json(request) = payload.map_err(|_| ApiError::malformed_json(&path))?;

    let field_errors = validate_order_request(&request);
    if !field_errors.is_empty() {
        return Err(ApiError::validation_failed(&path, field_errors));
    }

    info!(
        sku_code = request.sku_code,
        quantity = request.quantity,
        "Received order placement request"
    );

    let order = state
        .order_placement
        .place_order(request)
        .await
        .map_err(|e| ApiError::placement(&path, e))?;

    let envelope = ApiResponse::success(StatusCode::CREATED, &path, OrderResponse::from(order));
    Ok((StatusCode::CREATED, Json(envelope)))
}

/// Field-level request validation
///
/// Field names in the returned errors use the wire (camelCase) spelling.
fn validate_order_request(request: &OrderRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if request.sku_code.trim().is_empty() {
        errors.push(FieldError::new("skuCode", "must not be blank"));
    } else if request.sku_code.len() > 255 {
        errors.push(FieldError::new("skuCode", "size must be between 0 and 255"));
    }

    if request.price <= Decimal::ZERO {
        errors.push(FieldError::new("price", "must be greater than 0"));
    }

    if request.quantity < 0 {
        errors.push(FieldError::new(
            "quantity",
            "must be greater than or equal to 0",
        ));
    }

    if let Some(details) = &request.user_details {
        if details.email.trim().is_empty() {
            errors.push(FieldError::new("userDetails.email", "must not be blank"));
        } else if !details.email.contains('@') {
            errors.push(FieldError::new(
                "userDetails.email",
                "must be a well-formed email address",
            ));
        }
        if details.first_name.trim().is_empty() {
            errors.push(FieldError::new("userDetails.firstName", "must not be blank"));
        }
        if details.last_name.trim().is_empty() {
            errors.push(FieldError::new("userDetails.lastName", "must not be blank"));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserDetails;

    fn valid_request() -> OrderRequest {
        OrderRequest {
            sku_code: "iphone_15".to_string(),
            price: Decimal::from(100),
            quantity: 10,
            user_details: None,
        }
    }

    #[test]
    fn accepts_a_valid_request_without_user_details() {
        assert!(validate_order_request(&valid_request()).is_empty());
    }

    #[test]
    fn rejects_blank_sku_negative_quantity_and_non_positive_price() {
        let request = OrderRequest {
            sku_code: "   ".to_string(),
            price: Decimal::ZERO,
            quantity: -1,
            user_details: None,
        };

        let errors = validate_order_request(&request);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["skuCode", "price", "quantity"]);
    }

    #[test]
    fn validates_user_details_only_when_present() {
        let mut request = valid_request();
        request.user_details = Some(UserDetails {
            email: "not-an-email".to_string(),
            first_name: String::new(),
            last_name: "Doe".to_string(),
        });

        let errors = validate_order_request(&request);
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["userDetails.email", "userDetails.firstName"]);
    }
}
