use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::orders::OrderStatus;
use crate::utils::string_utils::deserialize_optional_string;

/// 주문 생성 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "상품을 선택해주세요"))]
    pub product_id: String,

    #[validate(range(min = 1, max = 100, message = "주문 수량은 1-100개 사이여야 합니다"))]
    pub quantity: i64,

    /// 생략하면 계정 아이디를 주문자명으로 사용합니다
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(max = 50, message = "주문자명은 50자 이하여야 합니다"))]
    pub customer_name: Option<String>,
}

/// 주문 상태 변경 요청
///
/// 상태값은 한글 상태명(`"배송중"` 등)으로 받습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}
