//! # Application Error Handling System
//!
//! 스토어프론트 백엔드 전역에서 사용하는 통합 에러 처리 시스템입니다.
//! 모든 계층은 `AppError`를 반환하고, Actix-Web의 `ResponseError` 구현이
//! 이를 일관된 JSON 응답으로 변환합니다.
//!
//! ## 에러 분류
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 필드 단위 입력값 검증 실패 |
//! | `DuplicateError` | 409 Conflict | 아이디/이메일 중복 (검증 에러와 같은 응답 형태) |
//! | `AuthenticationError` | 401 Unauthorized | 잘못된 자격 증명, 토큰 없음/위조/만료 |
//! | `AuthorizationError` | 403 Forbidden | 인증은 되었지만 역할 부족 |
//! | `NotFound` | 404 Not Found | 리소스 없음 |
//! | `ConflictError` | 409 Conflict | 재고 부족 등 비즈니스 규칙 위반 |
//! | `DatabaseError` | 500 Internal Server Error | 저장소 오류 |
//! | `ExternalServiceError` | 500 Internal Server Error | 외부 OAuth 프로바이더 오류 |
//! | `InternalError` | 500 Internal Server Error | 예상치 못한 오류 |
//!
//! ## 응답 형식
//!
//! ```json
//! {
//!   "success": false,
//!   "error": "validation_error",
//!   "message": "입력값을 확인해주세요.",
//!   "fields": { "username": "아이디는 4-20자의 영문, 숫자, 밑줄(_)만 사용 가능합니다" }
//! }
//! ```
//!
//! 5xx 계열 에러는 상세 내용을 로그로만 남기고, 클라이언트에는
//! 일반 메시지만 전달합니다. 인증 에러 역시 내부 사유(만료, 서명 불일치 등)는
//! 로그에만 기록되고 응답 메시지는 "유효하지 않거나 만료된 토큰" 수준으로 제한됩니다.

use std::collections::BTreeMap;
use std::fmt;

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

/// 업스트림/내부 오류 시 클라이언트에 노출되는 일반 메시지
pub const GENERIC_FAILURE_MESSAGE: &str = "서버 오류가 발생했습니다.";

/// 필드명 → 사용자 메시지 매핑
///
/// 실패한 필드만 담기며, 필드 순서는 이름순으로 고정됩니다.
///
/// # 예제
///
/// ```rust,ignore
/// let mut errors = FieldErrors::new();
/// errors.insert("phone", "올바른 휴대폰 번호를 입력해주세요");
///
/// assert_eq!(errors.get("phone"), Some("올바른 휴대폰 번호를 입력해주세요"));
/// assert!(errors.into_result().is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 단일 필드 에러 생성
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.insert(field, message);
        errors
    }

    /// 필드 에러 추가. 이미 존재하는 필드는 첫 메시지를 유지합니다.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 에러가 없으면 `Ok(())`, 있으면 `AppError::ValidationError`
    pub fn into_result(self) -> Result<(), AppError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

/// `validator` 크레이트의 에러를 필드 맵으로 변환
///
/// 필드당 첫 번째 에러의 메시지(없으면 에러 코드)를 사용합니다.
impl From<validator::ValidationErrors> for FieldErrors {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            if let Some(first) = field_errors.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                fields.insert(field.to_string(), message);
            }
        }
        fields
    }
}

/// 서명 토큰 검증 실패 사유
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// 토큰 구조를 해석할 수 없음 (JWT가 아닌 문자열, 디코딩 실패 등)
    #[error("malformed token")]
    Malformed,

    /// 서명 불일치
    #[error("token signature mismatch")]
    BadSignature,

    /// 만료 시각 경과
    #[error("token expired")]
    Expired,
}

/// 인증 실패의 내부 사유
///
/// 로그에는 구체적인 사유가 남지만, 클라이언트에는 [`AuthFailure::client_message`]만
/// 노출됩니다. 존재하지 않는 계정과 틀린 비밀번호는 같은 변형으로 표현되어
/// 계정 존재 여부가 드러나지 않습니다.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    #[error("authorization header missing")]
    MissingToken,

    #[error("authorization header is not a bearer credential")]
    InvalidHeader,

    #[error("{0}")]
    Token(#[from] TokenError),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid admin credentials")]
    InvalidAdminCredentials,

    #[error("federated login rejected")]
    FederatedRejected,
}

impl AuthFailure {
    /// 클라이언트에 전달되는 메시지
    pub fn client_message(&self) -> &'static str {
        match self {
            AuthFailure::MissingToken => "인증 토큰이 없습니다.",
            AuthFailure::InvalidHeader | AuthFailure::Token(_) => "유효하지 않거나 만료된 토큰입니다.",
            AuthFailure::InvalidCredentials => "아이디 또는 비밀번호가 일치하지 않습니다.",
            AuthFailure::InvalidAdminCredentials => "관리자 인증에 실패했습니다.",
            AuthFailure::FederatedRejected => "소셜 로그인에 실패했습니다.",
        }
    }

    /// 토큰 만료로 인한 실패인지 여부
    pub fn is_expired(&self) -> bool {
        matches!(self, AuthFailure::Token(TokenError::Expired))
    }
}

/// 애플리케이션 전역 에러 타입
///
/// `thiserror`로 `Error` trait을 구현하고, `actix_web::ResponseError`를 통해
/// HTTP 응답으로 자동 변환됩니다.
///
/// ## 에러 변환 패턴
///
/// ```rust,ignore
/// // MongoDB 에러 변환
/// collection.find_one(filter).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?;
///
/// // 외부 API 에러 변환
/// client.get(url).send().await
///     .map_err(|e| AppError::ExternalServiceError(e.to_string()))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// 저장소 연산 실패. 500으로 응답하며 상세 내용은 로그에만 남깁니다.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// 사용자가 수정할 수 있는 필드 단위 검증 실패
    #[error("Validation error: {0}")]
    ValidationError(FieldErrors),

    /// 아이디/이메일 유니크 제약 위반
    ///
    /// 저장소의 유니크 인덱스가 최종 판정자이며, 동시 가입 경쟁에서 밀린 요청도
    /// 이 변형으로 응답합니다.
    #[error("Duplicate error: {0}")]
    DuplicateError(FieldErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    /// 필드와 무관한 비즈니스 규칙 충돌
    #[error("Conflict error: {0}")]
    ConflictError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(AuthFailure),

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 프로바이더 호출 실패
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 단일 필드 검증 에러 생성
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::ValidationError(FieldErrors::single(field, message))
    }

    /// 단일 필드 중복 에러 생성
    pub fn duplicate(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::DuplicateError(FieldErrors::single(field, message))
    }

    /// 응답 본문의 `error` 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "validation_error",
            AppError::DuplicateError(_) => "duplicate_error",
            AppError::NotFound(_) => "not_found",
            AppError::ConflictError(_) => "conflict",
            AppError::AuthenticationError(_) => "authentication_required",
            AppError::AuthorizationError(_) => "insufficient_permissions",
            AppError::DatabaseError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => "internal_error",
        }
    }

    /// 클라이언트에 노출해도 되는 메시지
    fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(_) => "입력값을 확인해주세요.".to_string(),
            AppError::DuplicateError(_) => "이미 사용 중인 값이 있습니다.".to_string(),
            AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthorizationError(msg) => msg.clone(),
            AppError::AuthenticationError(failure) => failure.client_message().to_string(),
            AppError::DatabaseError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        AppError::AuthenticationError(AuthFailure::Token(err))
    }
}

impl From<AuthFailure> for AppError {
    fn from(failure: AuthFailure) -> Self {
        AppError::AuthenticationError(failure)
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateError(_) | AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::DatabaseError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("요청 처리 실패: {}", self);
        } else if let AppError::AuthenticationError(failure) = self {
            log::warn!("인증 실패: {}", failure);
        }

        let mut body = json!({
            "success": false,
            "error": self.code(),
            "message": self.public_message(),
        });

        if let AppError::ValidationError(fields) | AppError::DuplicateError(fields) = self {
            body["fields"] = json!(fields);
        }

        HttpResponse::build(status).json(body)
    }
}

/// 애플리케이션 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 에러에 컨텍스트를 덧붙여 `AppError::InternalError`로 변환
///
/// # 예제
///
/// ```rust,ignore
/// let token = encode(&header, &claims, &key).context("토큰 서명 실패")?;
/// ```
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;
    use actix_web::ResponseError;

    async fn body_json(error: AppError) -> serde_json::Value {
        let response = error.error_response();
        let bytes = to_bytes(response.into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_validation_error_response() {
        let error = AppError::validation("username", "필수 입력 항목입니다");
        assert_eq!(error.error_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_error_is_conflict_not_server_error() {
        let error = AppError::duplicate("username", "이미 사용 중인 아이디입니다");
        assert_eq!(error.error_response().status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_authentication_and_authorization_statuses() {
        let unauthenticated = AppError::AuthenticationError(AuthFailure::MissingToken);
        let forbidden = AppError::AuthorizationError("관리자 권한이 필요합니다.".to_string());

        assert_eq!(unauthenticated.error_response().status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden.error_response().status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn test_validation_body_carries_field_map() {
        let mut fields = FieldErrors::new();
        fields.insert("phone", "올바른 휴대폰 번호를 입력해주세요");
        fields.insert("address", "상세한 주소를 입력해주세요");

        let body = body_json(AppError::ValidationError(fields)).await;

        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["fields"]["phone"], "올바른 휴대폰 번호를 입력해주세요");
        assert_eq!(body["fields"]["address"], "상세한 주소를 입력해주세요");
    }

    #[actix_web::test]
    async fn test_upstream_errors_do_not_leak_details() {
        let body = body_json(AppError::DatabaseError("connection refused at 10.0.0.3:27017".to_string())).await;

        assert_eq!(body["message"], GENERIC_FAILURE_MESSAGE);
        assert!(!body.to_string().contains("10.0.0.3"));
    }

    #[actix_web::test]
    async fn test_expired_token_reason_is_not_leaked() {
        let expired = AppError::from(TokenError::Expired);
        let bad_signature = AppError::from(TokenError::BadSignature);

        let expired_body = body_json(expired).await;
        let bad_signature_body = body_json(bad_signature).await;

        assert_eq!(expired_body["message"], bad_signature_body["message"]);
        assert!(!expired_body.to_string().contains("expired"));
    }

    #[test]
    fn test_auth_failure_keeps_expiry_internally() {
        assert!(AuthFailure::Token(TokenError::Expired).is_expired());
        assert!(!AuthFailure::Token(TokenError::BadSignature).is_expired());
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut fields = FieldErrors::new();
        fields.insert("username", "first");
        fields.insert("username", "second");

        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get("username"), Some("first"));
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_error_context_trait() {
        let result: Result<(), &str> = Err("original error");
        let app_result = result.context("Additional context");

        if let Err(AppError::InternalError(msg)) = app_result {
            assert!(msg.contains("Additional context"));
            assert!(msg.contains("original error"));
        } else {
            panic!("Expected InternalError");
        }
    }
}
