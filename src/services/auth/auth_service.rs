//! 가입/로그인 흐름
//!
//! 계정 서비스의 결과에 토큰 발급을 결합해 클라이언트 응답을 만듭니다.
//! 관리자 로그인은 계정 저장소를 거치지 않고 [`AdminConfig`]와 비교합니다.

use std::sync::Arc;

use validator::Validate;

use crate::config::AdminConfig;
use crate::domain::dto::users::{AdminLoginRequest, AuthResponse, LoginRequest, SignupRequest, UserResponse};
use crate::domain::entities::users::Account;
use crate::errors::{AppError, AppResult, AuthFailure, FieldErrors};
use crate::services::auth::TokenService;
use crate::services::users::UserService;
use crate::services::validation::REQUIRED_MESSAGE;

pub struct AuthService {
    users: Arc<UserService>,
    tokens: Arc<TokenService>,
    admin: Option<AdminConfig>,
}

impl AuthService {
    /// `admin`이 `None`이면 관리자 로그인은 항상 실패합니다.
    pub fn new(users: Arc<UserService>, tokens: Arc<TokenService>, admin: Option<AdminConfig>) -> Self {
        Self { users, tokens, admin }
    }

    /// 회원가입 후 바로 로그인 토큰 발급
    pub async fn signup(&self, request: SignupRequest) -> AppResult<AuthResponse> {
        let account = self.users.create_account(request).await?;
        log::info!("회원가입: {}", account.username);

        self.respond_with_token(account)
    }

    /// 아이디/이메일 + 비밀번호 로그인
    pub async fn login(&self, request: LoginRequest) -> AppResult<AuthResponse> {
        request.validate().map_err(|e| AppError::ValidationError(FieldErrors::from(e)))?;

        let identifier = request
            .identifier()
            .ok_or_else(|| AppError::validation("username", REQUIRED_MESSAGE))?;

        let account = self.users.authenticate(identifier, &request.password).await?;
        log::info!("로그인 성공: {}", account.username);

        self.respond_with_token(account)
    }

    /// 센티널 관리자 로그인
    pub fn admin_login(&self, request: AdminLoginRequest) -> AppResult<AuthResponse> {
        request.validate().map_err(|e| AppError::ValidationError(FieldErrors::from(e)))?;

        let Some(admin) = self.admin.as_ref() else {
            log::warn!("관리자 로그인 시도: 관리자 계정이 설정되지 않았습니다");
            return Err(AuthFailure::InvalidAdminCredentials.into());
        };

        if !admin.matches(&request.username, &request.password) {
            log::warn!("관리자 로그인 실패");
            return Err(AuthFailure::InvalidAdminCredentials.into());
        }

        let issued = self.tokens.issue_admin_token()?;
        log::info!("관리자 로그인 성공");

        Ok(AuthResponse::new(issued, UserResponse::super_admin()))
    }

    /// 계정에 대한 토큰을 발급하고 로그인 응답 생성
    pub fn respond_with_token(&self, account: Account) -> AppResult<AuthResponse> {
        let issued = self.tokens.issue_user_token(&account)?;
        Ok(AuthResponse::new(issued, UserResponse::from(account)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::domain::models::auth::Role;
    use crate::repositories::users::InMemoryUserRepository;
    use crate::services::auth::PasswordHasher;

    fn service(admin: Option<AdminConfig>) -> (AuthService, Arc<TokenService>) {
        let users = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            PasswordHasher::new(4).unwrap(),
        ));
        let tokens = Arc::new(TokenService::new(&JwtConfig::new("auth-service-test")));
        (AuthService::new(users, tokens.clone(), admin), tokens)
    }

    fn signup() -> SignupRequest {
        SignupRequest {
            username: "shopper_01".to_string(),
            email: Some("shopper@example.com".to_string()),
            password: "Secret123!".to_string(),
            phone: "010-1234-5678".to_string(),
            address: "서울특별시 강남구 테헤란로 123".to_string(),
        }
    }

    fn login(username: Option<&str>, email: Option<&str>, password: &str) -> LoginRequest {
        LoginRequest {
            username: username.map(str::to_string),
            email: email.map(str::to_string),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_signup_issues_user_token() {
        let (service, tokens) = service(None);
        let response = service.signup(signup()).await.unwrap();

        let claims = tokens.verify(&response.token).unwrap();
        assert_eq!(claims.subject(), response.user.id);
        assert_eq!(claims.role(), Role::User);
        assert_eq!(response.token_type, "Bearer");
    }

    #[actix_web::test]
    async fn test_login_by_email() {
        let (service, _) = service(None);
        service.signup(signup()).await.unwrap();

        let response = service
            .login(login(None, Some("shopper@example.com"), "Secret123!"))
            .await
            .unwrap();
        assert_eq!(response.user.username, "shopper_01");
    }

    #[actix_web::test]
    async fn test_login_without_identifier_is_validation_error() {
        let (service, _) = service(None);

        assert!(matches!(
            service.login(login(None, None, "Secret123!")).await,
            Err(AppError::ValidationError(fields)) if fields.contains("username")
        ));
    }

    #[actix_web::test]
    async fn test_login_with_wrong_password() {
        let (service, _) = service(None);
        service.signup(signup()).await.unwrap();

        assert!(matches!(
            service.login(login(Some("shopper_01"), None, "Wrong123!")).await,
            Err(AppError::AuthenticationError(AuthFailure::InvalidCredentials))
        ));
    }

    #[test]
    fn test_admin_login_issues_sentinel_token() {
        let (service, tokens) = service(Some(AdminConfig::new("admin", "s3cret!")));

        let response = service
            .admin_login(AdminLoginRequest {
                username: "admin".to_string(),
                password: "s3cret!".to_string(),
            })
            .unwrap();

        let claims = tokens.verify(&response.token).unwrap();
        assert!(claims.is_super_admin());
        assert_eq!(response.user.role, Role::Admin);
    }

    #[test]
    fn test_admin_login_rejects_wrong_pair_and_disabled_config() {
        let request = || AdminLoginRequest {
            username: "admin".to_string(),
            password: "guess".to_string(),
        };

        let (enabled, _) = service(Some(AdminConfig::new("admin", "s3cret!")));
        assert!(matches!(
            enabled.admin_login(request()),
            Err(AppError::AuthenticationError(AuthFailure::InvalidAdminCredentials))
        ));

        let (disabled, _) = service(None);
        assert!(matches!(
            disabled.admin_login(request()),
            Err(AppError::AuthenticationError(AuthFailure::InvalidAdminCredentials))
        ));
    }
}
