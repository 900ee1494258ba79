//! 주문 핸들러
//!
//! 스코프 전체가 인증 필수입니다. 주문 생성은 회원 누구나, 전체 목록과 상태
//! 변경은 관리자만 가능합니다. 본인 주문 내역은 `/api/users/me/orders`에 있습니다.

use actix_web::{get, post, put, web, HttpResponse};
use crate::domain::dto::orders::{CreateOrderRequest, OrderResponse, UpdateOrderStatusRequest};
use crate::domain::dto::ApiResponse;
use crate::domain::models::auth::{AdminUser, AuthenticatedUser};
use crate::errors::AppError;
use crate::services::orders::OrderService;

/// 주문 생성
///
/// # Endpoint
/// `POST /api/orders`
///
/// ```json
/// { "product_id": "65f1c0ffee0000000000beef", "quantity": 2 }
/// ```
///
/// 재고가 부족하면 409로 응답합니다.
#[post("")]
pub async fn place_order(
    order_service: web::Data<OrderService>,
    user: AuthenticatedUser,
    payload: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order = order_service.place_order(&user, payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        OrderResponse::from(order),
        "주문이 접수되었습니다.",
    )))
}

/// 전체 주문 목록 (관리자, 최신순)
#[get("")]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let orders: Vec<OrderResponse> = order_service
        .list_orders()
        .await?
        .into_iter()
        .map(OrderResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(orders)))
}

/// 주문 상태 변경 (관리자)
///
/// 배송완료/취소된 주문은 변경할 수 없습니다.
#[put("/{order_id}/status")]
pub async fn update_order_status(
    order_service: web::Data<OrderService>,
    _admin: AdminUser,
    order_id: web::Path<String>,
    payload: web::Json<UpdateOrderStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order = order_service.update_status(&order_id, payload.into_inner().status).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        OrderResponse::from(order),
        "주문 상태가 변경되었습니다.",
    )))
}
