use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::dto::users::response::UserResponse;
use crate::domain::models::token::IssuedToken;

/// 가입/로그인/소셜 로그인 공통 응답
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn new(issued: IssuedToken, user: UserResponse) -> Self {
        Self {
            success: true,
            token: issued.token,
            token_type: "Bearer",
            expires_at: issued.expires_at,
            user,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UsernameAvailabilityResponse {
    pub success: bool,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}

/// 단일 필드 검증 결과. `message`는 실패 시에만 존재합니다.
#[derive(Debug, Serialize)]
pub struct FieldValidationResponse {
    pub success: bool,
    pub field: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
}
