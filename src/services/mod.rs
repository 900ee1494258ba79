//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 `main`에서 한 번 생성되어 `web::Data`로 핸들러에 주입됩니다.
//! 저장소는 trait 객체로 전달되므로 테스트에서는 메모리 저장소로 바꿔 끼울 수 있습니다.
//!
//! # Modules
//!
//! - [`auth`] - 비밀번호 해싱, 토큰, 로그인, 소셜 로그인
//! - [`users`] - 계정 생명주기
//! - [`validation`] - 가입 필드 검증 규칙
//! - [`products`], [`orders`] - 카탈로그와 주문
//!
//! # Examples
//!
//! ```rust,ignore
//! use storefront_backend::services::{auth::TokenService, users::UserService};
//!
//! let tokens = web::Data::new(TokenService::new(&jwt_config));
//! let users = web::Data::new(UserService::new(user_store, hasher));
//! ```

pub mod auth;
pub mod orders;
pub mod products;
pub mod users;
pub mod validation;
