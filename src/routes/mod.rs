//! API 라우트 설정 모듈
//!
//! 기능별 스코프를 묶어 애플리케이션에 등록합니다. 모든 API는 `/api` 아래에 있고,
//! 헬스체크만 루트에 있습니다.
//!
//! # Auth Middleware Usage
//!
//! | 스코프 | 미들웨어 | 비고 |
//! |--------|----------|------|
//! | `/api/auth` | 없음 | 가입/로그인 자체는 인증 불필요 |
//! | `/api/products` | `optional()` | 조회는 공개, 변경은 `AdminUser` 추출자 |
//! | `/api/orders` | `required()` | 목록/상태 변경은 `AdminUser` 추출자 |
//! | `/api/users` | `required()` | 본인 또는 관리자, 일부 관리자 전용 |
//! | `/api/admin` | `required_with_role(Role::Admin)` | 스코프 전체 관리자 전용 |
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new()
//!     .configure(|cfg| services.register(cfg))
//!     .configure(configure_all_routes);
//! ```

use crate::domain::models::auth::Role;
use crate::handlers;
use crate::middlewares::AuthMiddleware;
use actix_web::web;
use chrono;
use serde_json::json;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    // Health check endpoint
    cfg.service(health_check);

    // Feature-specific routes
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_product_routes(cfg);
    configure_order_routes(cfg);
    configure_admin_routes(cfg);
}

/// 인증 관련 라우트
///
/// ```bash
/// # 회원가입
/// curl -X POST http://localhost:5001/api/auth/signup \
///   -H "Content-Type: application/json" \
///   -d '{"username":"shopper_01","password":"Secret123!","phone":"010-1234-5678","address":"서울특별시 강남구 테헤란로 123"}'
///
/// # 로그인
/// curl -X POST http://localhost:5001/api/auth/login \
///   -H "Content-Type: application/json" \
///   -d '{"username":"shopper_01","password":"Secret123!"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .service(handlers::auth::signup)
            .service(handlers::auth::check_username)
            .service(handlers::auth::validate_field)
            .service(handlers::auth::login)
            .service(handlers::auth::admin_login)
            // 소셜 로그인 (google, naver, kakao)
            .service(handlers::auth::federated_redirect)
            .service(handlers::auth::federated_callback)
    );
}

/// 사용자 관련 라우트
///
/// `/me` 라우트가 `/{user_id}`보다 먼저 등록되어야 `me`가 ID로 해석되지 않습니다.
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/users")
            .wrap(AuthMiddleware::required())
            .service(handlers::users::get_me)
            .service(handlers::users::update_me)
            .service(handlers::users::change_my_password)
            .service(handlers::users::my_orders)
            .service(handlers::users::list_users)
            .service(handlers::users::get_user)
            .service(handlers::users::update_user)
            .service(handlers::users::change_user_password)
            .service(handlers::users::delete_user)
    );
}

fn configure_product_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/products")
            .wrap(AuthMiddleware::optional())
            .service(handlers::products::list_products)
            .service(handlers::products::get_product)
            .service(handlers::products::create_product)
            .service(handlers::products::update_product)
            .service(handlers::products::delete_product)
    );
}

fn configure_order_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/orders")
            .wrap(AuthMiddleware::required())
            .service(handlers::orders::place_order)
            .service(handlers::orders::list_orders)
            .service(handlers::orders::update_order_status)
    );
}

fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/admin")
            .wrap(AuthMiddleware::required_with_role(Role::Admin))
            .service(handlers::admin::list_users)
            .service(handlers::admin::delete_user)
            .service(handlers::admin::list_orders)
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:5001/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "storefront_backend",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "storefront_backend",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "features": {
            "database": "MongoDB",
            "auth": "HS256 JWT",
            "federated_login": ["google", "naver", "kakao"]
        }
    }))
}
