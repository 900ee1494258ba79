//! 관리자 대시보드 핸들러
//!
//! `/api/admin` 스코프는 `AuthMiddleware::required_with_role(Role::Admin)`으로
//! 감싸져 있어 핸들러에서 역할을 다시 확인하지 않습니다.

use actix_web::{delete, get, web, HttpResponse};
use crate::domain::dto::orders::OrderResponse;
use crate::domain::dto::users::UserResponse;
use crate::domain::dto::{ApiResponse, MessageResponse};
use crate::errors::AppError;
use crate::services::orders::OrderService;
use crate::services::users::UserService;

#[get("/users")]
pub async fn list_users(
    user_service: web::Data<UserService>,
) -> Result<HttpResponse, AppError> {
    let users: Vec<UserResponse> = user_service
        .list_accounts()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(users)))
}

#[delete("/users/{user_id}")]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user_service.delete_account(&user_id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("회원이 삭제되었습니다.")))
}

#[get("/orders")]
pub async fn list_orders(
    order_service: web::Data<OrderService>,
) -> Result<HttpResponse, AppError> {
    let orders: Vec<OrderResponse> = order_service
        .list_orders()
        .await?
        .into_iter()
        .map(OrderResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(orders)))
}
