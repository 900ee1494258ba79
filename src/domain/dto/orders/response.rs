use serde::Serialize;

use crate::domain::entities::orders::{Order, OrderStatus};

#[derive(Debug, Clone, Serialize)]
pub struct OrderResponse {
    pub id: String,
    pub order_number: String,
    pub account_id: String,
    pub customer_name: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub order_date: Option<String>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id_string().unwrap_or_default(),
            order_date: order.order_date.try_to_rfc3339_string().ok(),
            order_number: order.order_number,
            account_id: order.account_id,
            customer_name: order.customer_name,
            product_id: order.product_id,
            product_name: order.product_name,
            quantity: order.quantity,
            total_amount: order.total_amount,
            status: order.status,
        }
    }
}
