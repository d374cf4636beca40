//! # Order Model
//!
//! Persisted record of a placed order.
//!
//! ## Overview
//!
//! An `Order` row is written exactly once, after the inventory service has
//! confirmed availability, and is never mutated afterwards. The business
//! identifier is `order_number` (a UUID v4 string assigned before the
//! insert); `id` is a storage-assigned surrogate key.
//!
//! ## Database Schema
//!
//! Maps to the `orders` table:
//! - `id`: Primary key (BIGSERIAL)
//! - `order_number`: Business identifier (VARCHAR, unique)
//! - `sku_code`: Product SKU the order is for (VARCHAR)
//! - `price`: Unit price (NUMERIC(19,2))
//! - `quantity`: Units ordered (INTEGER, non-negative)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

/// A persisted order row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i64,
    pub order_number: String,
    pub sku_code: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// Order fields known before persistence assigns the row id
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub order_number: String,
    pub sku_code: String,
    pub price: Decimal,
    pub quantity: i32,
}

/// Inbound request to place an order
///
/// Wire format uses camelCase field names. Customer details are optional;
/// an absent `userDetails` yields empty contact fields on the emitted
/// placement event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub sku_code: String,
    /// Crosses the wire as a JSON number
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i32,
    #[serde(default)]
    pub user_details: Option<UserDetails>,
}

/// Customer contact details attached to an order request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl Order {
    /// Insert a new order and return the stored row
    pub async fn create(pool: &PgPool, new_order: NewOrder) -> Result<Order, sqlx::Error> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (order_number, sku_code, price, quantity)
            VALUES ($1, $2, $3, $4)
            RETURNING id, order_number, sku_code, price, quantity
            "#,
        )
        .bind(&new_order.order_number)
        .bind(&new_order.sku_code)
        .bind(new_order.price)
        .bind(new_order.quantity)
        .fetch_one(pool)
        .await?;

        Ok(order)
    }
}
