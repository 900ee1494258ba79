//! Authentication HTTP Handlers
//!
//! 가입, 로그인, 소셜 로그인 엔드포인트입니다. 이 스코프에는 인증 미들웨어가
//! 걸려 있지 않습니다.
//!
//! # Endpoints
//!
//! - `POST /api/auth/signup` - 회원가입 후 토큰 발급 (201)
//! - `POST /api/auth/check-username` - 아이디 사용 가능 여부
//! - `POST /api/auth/validate-field` - 필드 단위 검증 (입력 중 피드백용)
//! - `POST /api/auth/login` - 아이디 또는 이메일 로그인
//! - `POST /api/auth/admin-login` - 관리자 로그인
//! - `GET /api/auth/{provider}` - 소셜 로그인 시작 (302)
//! - `GET /api/auth/{provider}/callback` - 소셜 로그인 콜백
use actix_web::{get, http::header, post, web, HttpResponse};
use crate::config::FederatedProvider;
use crate::domain::dto::users::{
    AdminLoginRequest, CheckUsernameRequest, FieldValidationResponse, LoginRequest, OAuthCallbackQuery,
    SignupRequest, UsernameAvailabilityResponse, ValidateFieldRequest,
};
use crate::errors::AppError;
use crate::services::auth::{AuthService, FederatedAuthService};
use crate::services::users::UserService;
use crate::services::validation::{self, Field, DUPLICATE_USERNAME_MESSAGE};

/// 회원가입 핸들러
///
/// # Endpoint
/// `POST /api/auth/signup`
///
/// ```json
/// {
///   "username": "shopper_01",
///   "email": "shopper@example.com",
///   "password": "Secret123!",
///   "phone": "010-1234-5678",
///   "address": "서울특별시 강남구 테헤란로 123"
/// }
/// ```
///
/// 검증 실패는 400, 아이디/이메일 중복은 409로 응답하며 둘 다 `fields`에
/// 필드별 메시지가 담깁니다.
#[post("/signup")]
pub async fn signup(
    auth_service: web::Data<AuthService>,
    payload: web::Json<SignupRequest>,
) -> Result<HttpResponse, AppError> {
    let response = auth_service.signup(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(response))
}

/// 아이디 사용 가능 여부 확인
///
/// 형식이 맞지 않는 아이디는 조회하지 않고 400으로 응답합니다.
#[post("/check-username")]
pub async fn check_username(
    user_service: web::Data<UserService>,
    payload: web::Json<CheckUsernameRequest>,
) -> Result<HttpResponse, AppError> {
    let available = user_service.is_username_available(&payload.username).await?;

    Ok(HttpResponse::Ok().json(UsernameAvailabilityResponse {
        success: true,
        available,
        message: (!available).then_some(DUPLICATE_USERNAME_MESSAGE),
    }))
}

/// 필드 하나를 서버 규칙으로 검증
///
/// 검증 실패도 200으로 응답하고 `valid: false`와 메시지를 담습니다.
/// 알 수 없는 필드명만 400입니다.
#[post("/validate-field")]
pub async fn validate_field(
    payload: web::Json<ValidateFieldRequest>,
) -> Result<HttpResponse, AppError> {
    let ValidateFieldRequest { field, value } = payload.into_inner();
    let parsed = Field::from_str(&field)
        .ok_or_else(|| AppError::validation("field", "알 수 없는 필드입니다"))?;

    let message = validation::validate(parsed, &value);

    Ok(HttpResponse::Ok().json(FieldValidationResponse {
        success: true,
        field,
        valid: message.is_none(),
        message,
    }))
}

/// 로컬 로그인 핸들러
///
/// `username`과 `email` 중 하나로 로그인합니다. 계정이 없는 경우와
/// 비밀번호가 틀린 경우는 같은 401 응답을 받습니다.
///
/// # Endpoint
/// `POST /api/auth/login`
#[post("/login")]
pub async fn login(
    auth_service: web::Data<AuthService>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = auth_service.login(payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(response))
}

/// 관리자 로그인 핸들러
///
/// 계정 레코드가 없는 관리자 토큰을 발급합니다.
#[post("/admin-login")]
pub async fn admin_login(
    auth_service: web::Data<AuthService>,
    payload: web::Json<AdminLoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = auth_service.admin_login(payload.into_inner())?;

    Ok(HttpResponse::Ok().json(response))
}

fn parse_provider(provider: &str) -> Result<FederatedProvider, AppError> {
    FederatedProvider::from_str(provider).map_err(AppError::NotFound)
}

/// 소셜 로그인 시작
///
/// # Endpoint
/// `GET /api/auth/{provider}` (`google`, `naver`, `kakao`)
///
/// 프로바이더 인증 페이지로 302 리다이렉트합니다.
#[get("/{provider}")]
pub async fn federated_redirect(
    federated_service: web::Data<FederatedAuthService>,
    provider: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&provider)?;
    let url = federated_service.authorization_url(provider)?;

    log::debug!("{} 로그인 리다이렉트", provider.as_str());

    Ok(HttpResponse::Found()
        .insert_header((header::LOCATION, url))
        .finish())
}

/// 소셜 로그인 콜백
///
/// # Endpoint
/// `GET /api/auth/{provider}/callback?code={code}&state={state}`
///
/// 성공하면 `/login`과 같은 형태의 토큰 응답을 반환합니다.
#[get("/{provider}/callback")]
pub async fn federated_callback(
    federated_service: web::Data<FederatedAuthService>,
    auth_service: web::Data<AuthService>,
    provider: web::Path<String>,
    query: web::Query<OAuthCallbackQuery>,
) -> Result<HttpResponse, AppError> {
    let provider = parse_provider(&provider)?;
    let account = federated_service.authenticate(provider, query.into_inner()).await?;
    let response = auth_service.respond_with_token(account)?;

    Ok(HttpResponse::Ok().json(response))
}
