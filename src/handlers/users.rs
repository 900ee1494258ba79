//! # User Management HTTP Handlers
//!
//! 계정 조회/수정/삭제 엔드포인트입니다. 스코프 전체가 `AuthMiddleware::required()`
//! 아래에 있으므로 모든 핸들러는 인증된 요청만 받습니다.
//!
//! | 메서드 | 경로 | 권한 |
//! |--------|------|------|
//! | `GET` | `/api/users/me` | 본인 |
//! | `PUT` | `/api/users/me` | 본인 |
//! | `PUT` | `/api/users/me/password` | 본인 (현재 비밀번호 필요) |
//! | `GET` | `/api/users/me/orders` | 본인 |
//! | `GET` | `/api/users` | 관리자 |
//! | `GET` | `/api/users/{id}` | 본인 또는 관리자 |
//! | `PUT` | `/api/users/{id}` | 본인 또는 관리자 |
//! | `PUT` | `/api/users/{id}/password` | 본인 또는 관리자 |
//! | `DELETE` | `/api/users/{id}` | 관리자 |
//!
//! `/me` 경로는 `/{id}`보다 먼저 등록되어야 합니다.
//!
//! 센티널 관리자는 계정 레코드가 없으므로 `/me` 조회는 고정 프로필을 돌려주고,
//! 수정 요청은 404로 응답합니다.

use actix_web::{delete, get, put, web, HttpResponse};
use crate::domain::dto::orders::OrderResponse;
use crate::domain::dto::users::{PasswordChangeRequest, ProfileUpdateRequest, UserResponse};
use crate::domain::dto::{ApiResponse, MessageResponse};
use crate::domain::models::auth::{AdminUser, AuthenticatedUser};
use crate::errors::AppError;
use crate::services::orders::OrderService;
use crate::services::users::UserService;

/// 센티널 관리자를 제외한 호출자의 계정 ID
fn own_account_id(user: &AuthenticatedUser) -> Result<&str, AppError> {
    user.account_id()
        .ok_or_else(|| AppError::NotFound("관리자 계정은 수정할 수 없습니다.".to_string()))
}

/// 내 정보 조회
#[get("/me")]
pub async fn get_me(
    user_service: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = match user.account_id() {
        Some(id) => UserResponse::from(user_service.get_account(id).await?),
        None => UserResponse::super_admin(),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(profile)))
}

/// 내 정보 수정
///
/// 이메일, 휴대폰 번호, 주소만 수정할 수 있고, 보낸 필드만 검증합니다.
#[put("/me")]
pub async fn update_me(
    user_service: web::Data<UserService>,
    user: AuthenticatedUser,
    payload: web::Json<ProfileUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let id = own_account_id(&user)?;
    let account = user_service.update_profile(id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        UserResponse::from(account),
        "회원 정보가 수정되었습니다.",
    )))
}

/// 내 비밀번호 변경
#[put("/me/password")]
pub async fn change_my_password(
    user_service: web::Data<UserService>,
    user: AuthenticatedUser,
    payload: web::Json<PasswordChangeRequest>,
) -> Result<HttpResponse, AppError> {
    let id = own_account_id(&user)?;
    user_service.change_password(id, payload.into_inner(), true).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("비밀번호가 변경되었습니다.")))
}

/// 내 주문 내역 (최신순)
#[get("/me/orders")]
pub async fn my_orders(
    order_service: web::Data<OrderService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let orders: Vec<OrderResponse> = order_service
        .list_for(&user)
        .await?
        .into_iter()
        .map(OrderResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(orders)))
}

/// 전체 회원 목록 (관리자)
#[get("")]
pub async fn list_users(
    user_service: web::Data<UserService>,
    _admin: AdminUser,
) -> Result<HttpResponse, AppError> {
    let users: Vec<UserResponse> = user_service
        .list_accounts()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(users)))
}

/// 회원 조회 (본인 또는 관리자)
#[get("/{user_id}")]
pub async fn get_user(
    user_service: web::Data<UserService>,
    user: AuthenticatedUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user.authorize_self_or_admin(&user_id)?;
    let account = user_service.get_account(&user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(UserResponse::from(account))))
}

/// 회원 정보 수정 (본인 또는 관리자)
#[put("/{user_id}")]
pub async fn update_user(
    user_service: web::Data<UserService>,
    user: AuthenticatedUser,
    user_id: web::Path<String>,
    payload: web::Json<ProfileUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    user.authorize_self_or_admin(&user_id)?;
    let account = user_service.update_profile(&user_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        UserResponse::from(account),
        "회원 정보가 수정되었습니다.",
    )))
}

/// 비밀번호 변경 (본인 또는 관리자)
///
/// 관리자는 현재 비밀번호 없이 변경할 수 있습니다.
#[put("/{user_id}/password")]
pub async fn change_user_password(
    user_service: web::Data<UserService>,
    user: AuthenticatedUser,
    user_id: web::Path<String>,
    payload: web::Json<PasswordChangeRequest>,
) -> Result<HttpResponse, AppError> {
    user.authorize_self_or_admin(&user_id)?;
    user_service
        .change_password(&user_id, payload.into_inner(), !user.is_admin())
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("비밀번호가 변경되었습니다.")))
}

/// 회원 삭제 (관리자)
///
/// 물리 삭제이며 복구할 수 없습니다.
#[delete("/{user_id}")]
pub async fn delete_user(
    user_service: web::Data<UserService>,
    admin: AdminUser,
    user_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    user_service.delete_account(&user_id).await?;
    log::info!("회원 삭제: {} (요청자: {:?})", user_id, admin.0.subject());

    Ok(HttpResponse::Ok().json(MessageResponse::new("회원이 삭제되었습니다.")))
}
