//! 미들웨어 모듈
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - Bearer 토큰 추출 및 서명/만료 검증
//! - 검증된 사용자 정보를 request extension에 저장
//! - 강제(`required`) / 선택(`optional`) 인증 모드
//! - 스코프 단위 역할 요구 (`required_with_role`)
//!
//! 토큰 검증에는 `App`에 등록된 `web::Data<TokenService>`를 사용합니다.
//!
//! ## 특정 스코프에만 적용
//! ```rust,ignore
//! use actix_web::{web, App};
//!
//! App::new()
//!     .app_data(token_service.clone())
//!     .service(
//!         web::scope("/api/admin")
//!             .wrap(AuthMiddleware::required_with_role(Role::Admin))
//!             .service(handlers::admin::list_users)
//!     )
//!     .service(
//!         web::scope("/api/products")
//!             .wrap(AuthMiddleware::optional())
//!             .service(handlers::products::list_products)
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

// 미들웨어 재export
pub use auth_middleware::AuthMiddleware;
pub use auth_inner::authenticate;
