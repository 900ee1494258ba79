//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 받아 서비스 계층에 위임하고, 결과를 JSON 응답으로 변환합니다.
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//!   Handlers (이 모듈) - HTTP 엔드포인트 처리         ← Web Layer
//! ├─────────────────────────────────────────────┤
//!   Services - 비즈니스 로직                        ← Service Layer
//! ├─────────────────────────────────────────────┤
//!   Repositories - 데이터 접근                     ← Repository Layer
//! └─────────────────────────────────────────────┘
//! ```
//!
//! 서비스는 `main`에서 생성되어 `web::Data`로 등록되며, 핸들러는 추출자로
//! 받아서 사용합니다. 인증 정보는 [`AuthenticatedUser`]/[`AdminUser`] 추출자로
//! 받습니다.
//!
//! ```rust,ignore
//! #[get("/{product_id}")]
//! pub async fn get_product(
//!     product_service: web::Data<ProductService>,
//!     product_id: web::Path<String>,
//! ) -> Result<HttpResponse, AppError> {
//!     let product = product_service.get_product(&product_id).await?;
//!     Ok(HttpResponse::Ok().json(ApiResponse::ok(ProductResponse::from(product))))
//! }
//! ```
//!
//! 모든 에러는 `AppError`로 전파되고 `ResponseError` 구현이 상태 코드와
//! `{"success": false, ...}` 본문을 만듭니다.
//!
//! [`AuthenticatedUser`]: crate::domain::models::auth::AuthenticatedUser
//! [`AdminUser`]: crate::domain::models::auth::AdminUser

pub mod admin;
pub mod auth;
pub mod orders;
pub mod products;
pub mod users;
