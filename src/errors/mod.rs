//! 애플리케이션 에러 타입

pub mod errors;

pub use errors::{AppError, AppResult, AuthFailure, ErrorContext, FieldErrors, TokenError};
