//! Users Entity Module
//!
//! 계정 엔티티를 정의합니다.
//!
//! # 사용 예제
//!
//! ```rust,ignore
//! use storefront_backend::domain::entities::users::Account;
//!
//! // 로컬 가입 계정
//! let account = Account::new_local(
//!     "shopper_01".to_string(),
//!     Some("shopper@example.com".to_string()),
//!     hashed_password,
//!     "010-1234-5678".to_string(),
//!     "서울특별시 강남구 테헤란로 123".to_string(),
//! );
//!
//! // 소셜 로그인 계정
//! let federated = Account::new_federated(
//!     "kim_google".to_string(),
//!     None,
//!     FederatedProvider::Google,
//!     "google-subject-id".to_string(),
//! );
//! ```

pub mod account;

pub use account::{Account, FederatedIdentities};
