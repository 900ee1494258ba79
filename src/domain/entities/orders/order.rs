use chrono::Utc;
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 주문 상태
///
/// 저장 및 응답 모두 한글 상태명을 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "주문접수")]
    Received,
    #[serde(rename = "결제완료")]
    Paid,
    #[serde(rename = "배송준비")]
    Preparing,
    #[serde(rename = "배송중")]
    Shipping,
    #[serde(rename = "배송완료")]
    Delivered,
    #[serde(rename = "취소")]
    Cancelled,
}

impl OrderStatus {
    pub const FINAL: [OrderStatus; 2] = [OrderStatus::Delivered, OrderStatus::Cancelled];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "주문접수",
            OrderStatus::Paid => "결제완료",
            OrderStatus::Preparing => "배송준비",
            OrderStatus::Shipping => "배송중",
            OrderStatus::Delivered => "배송완료",
            OrderStatus::Cancelled => "취소",
        }
    }

    /// 취소 또는 배송완료 이후에는 상태를 바꿀 수 없습니다
    pub fn is_final(&self) -> bool {
        Self::FINAL.contains(self)
    }
}

/// 주문 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub order_number: String,
    pub account_id: String,
    pub customer_name: String,
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub total_amount: i64,
    #[serde(default)]
    pub status: OrderStatus,
    pub order_date: DateTime,
}

impl Order {
    pub fn new(
        account_id: String,
        customer_name: String,
        product_id: String,
        product_name: String,
        quantity: i64,
        total_amount: i64,
    ) -> Self {
        Self {
            id: None,
            order_number: Self::generate_order_number(),
            account_id,
            customer_name,
            product_id,
            product_name,
            quantity,
            total_amount,
            status: OrderStatus::Received,
            order_date: DateTime::now(),
        }
    }

    /// 단가 x 수량. `i64` 범위를 넘으면 `None`
    pub fn total_for(unit_price: i64, quantity: i64) -> Option<i64> {
        unit_price.checked_mul(quantity)
    }

    /// `ORD-YYYYMMDDHHMMSS-XXXXXXXX` 형식의 주문 번호
    pub fn generate_order_number() -> String {
        let suffix = uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase();
        format!("ORD-{}-{}", Utc::now().format("%Y%m%d%H%M%S"), suffix)
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_defaults() {
        let order = Order::new(
            "acc".to_string(),
            "shopper_01".to_string(),
            "prod".to_string(),
            "무선 이어폰".to_string(),
            2,
            178000,
        );

        assert_eq!(order.total_amount, 178000);
        assert_eq!(order.status, OrderStatus::Received);
        assert!(order.order_number.starts_with("ORD-"));
        assert_eq!(order.order_number.len(), "ORD-".len() + 14 + 1 + 8);
    }

    #[test]
    fn test_total_for_detects_overflow() {
        assert_eq!(Order::total_for(89000, 2), Some(178000));
        assert_eq!(Order::total_for(5_000_000_000_000_000_000, 2), None);
    }

    #[test]
    fn test_order_numbers_are_distinct() {
        assert_ne!(Order::generate_order_number(), Order::generate_order_number());
    }

    #[test]
    fn test_status_serialized_in_korean() {
        assert_eq!(serde_json::to_string(&OrderStatus::Shipping).unwrap(), "\"배송중\"");
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"취소\"").unwrap(),
            OrderStatus::Cancelled
        );
        assert!(OrderStatus::Delivered.is_final());
        assert!(!OrderStatus::Paid.is_final());
    }
}
