use serde::Deserialize;
use validator::Validate;

use crate::utils::string_utils::deserialize_optional_string;

/// 로그인 요청
///
/// `username`과 `email` 중 하나로 계정을 찾습니다. 둘 다 있으면 `username`을 우선합니다.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

impl LoginRequest {
    /// 계정 조회에 사용할 식별자
    pub fn identifier(&self) -> Option<&str> {
        self.username.as_deref().or(self.email.as_deref())
    }
}

/// 센티널 관리자 로그인 요청
#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(length(min = 1, message = "아이디를 입력해주세요"))]
    pub username: String,

    #[validate(length(min = 1, message = "비밀번호를 입력해주세요"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct CheckUsernameRequest {
    #[serde(default)]
    pub username: String,
}

/// 단일 필드 검증 요청 (입력 중 실시간 피드백용)
#[derive(Debug, Deserialize, Validate)]
pub struct ValidateFieldRequest {
    #[validate(length(min = 1, message = "검증할 필드를 지정해주세요"))]
    pub field: String,

    #[serde(default)]
    pub value: String,
}

/// 소셜 로그인 콜백 쿼리
///
/// 사용자가 동의를 거부하면 프로바이더는 `code` 대신 `error`를 보냅니다.
#[derive(Debug, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
