//! 인증 및 보안 서비스 모듈
//!
//! - [`PasswordHasher`]: bcrypt 해싱과 검증
//! - [`TokenService`]: HS256 토큰 발급/검증, 소셜 로그인 `state` 서명
//! - [`AuthService`]: 가입, 로그인, 관리자 로그인 응답 생성
//! - [`FederatedAuthService`]: Google/Naver/Kakao OAuth 2.0 흐름
//!
//! # Examples
//!
//! ```rust,ignore
//! use storefront_backend::services::auth::{AuthService, TokenService};
//!
//! let tokens = Arc::new(TokenService::new(&jwt_config));
//! let auth = AuthService::new(users.clone(), tokens.clone(), AdminConfig::from_env());
//! let response = auth.login(request).await?;
//! ```

pub mod auth_service;
pub mod federated_auth_service;
pub mod password_hasher;
pub mod token_service;

pub use auth_service::AuthService;
pub use federated_auth_service::FederatedAuthService;
pub use password_hasher::PasswordHasher;
pub use token_service::TokenService;
