//! # 소셜 로그인 서비스
//!
//! Google, Naver, Kakao의 OAuth 2.0 Authorization Code 흐름을 처리합니다.
//!
//! ```text
//! GET /api/auth/{provider}
//!   └─▶ 302 authorize_uri?client_id&redirect_uri&response_type=code&state
//!
//! GET /api/auth/{provider}/callback?code&state
//!   ├─ state 검증 (서명 + 만료 + 프로바이더 일치)
//!   ├─ POST token_uri (form)            ─▶ access_token
//!   ├─ GET profile_uri (Bearer)         ─▶ FederatedProfile
//!   └─ UserService::find_or_create_federated
//! ```
//!
//! `state`는 서버에 저장하지 않는 서명 토큰이므로 별도의 세션 저장소가 필요 없습니다.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;

use crate::config::{FederatedProvider, OAuthClientConfig, OAuthConfig};
use crate::domain::dto::users::OAuthCallbackQuery;
use crate::domain::entities::users::Account;
use crate::domain::models::oauth::{FederatedProfile, OAuthTokenResponse};
use crate::errors::{AppError, AppResult, AuthFailure};
use crate::services::auth::TokenService;
use crate::services::users::UserService;

pub struct FederatedAuthService {
    config: OAuthConfig,
    tokens: Arc<TokenService>,
    users: Arc<UserService>,
    http: reqwest::Client,
}

impl FederatedAuthService {
    pub fn new(config: OAuthConfig, tokens: Arc<TokenService>, users: Arc<UserService>) -> AppResult<Self> {
        let http = Self::http_client(config.http_timeout_secs)?;
        Ok(Self {
            config,
            tokens,
            users,
            http,
        })
    }

    /// 응답하지 않는 프로바이더가 콜백 요청을 붙잡아 두지 않도록 제한 시간을 둔 클라이언트
    fn http_client(timeout_secs: u64) -> AppResult<reqwest::Client> {
        let timeout = StdDuration::from_secs(timeout_secs);
        reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(StdDuration::from_secs(5)))
            .pool_idle_timeout(StdDuration::from_secs(30))
            .build()
            .map_err(|e| AppError::InternalError(format!("HTTP 클라이언트 생성 실패: {}", e)))
    }

    fn client(&self, provider: FederatedProvider) -> AppResult<&OAuthClientConfig> {
        self.config.client(provider).ok_or_else(|| {
            AppError::NotFound(format!("{} 로그인이 활성화되어 있지 않습니다.", provider.as_str()))
        })
    }

    /// 프로바이더 인증 페이지 URL
    pub fn authorization_url(&self, provider: FederatedProvider) -> AppResult<String> {
        let client = self.client(provider)?;
        let state = self
            .tokens
            .issue_oauth_state(provider, Duration::minutes(self.config.state_ttl_minutes))?;

        let mut params = vec![
            ("client_id", client.client_id.as_str()),
            ("redirect_uri", client.redirect_uri.as_str()),
            ("response_type", "code"),
            ("state", state.as_str()),
        ];
        if let Some(scope) = provider.scope() {
            params.push(("scope", scope));
        }

        let query_string = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&");

        Ok(format!("{}?{}", provider.authorize_uri(), query_string))
    }

    /// 콜백 처리 후 로그인할 계정 반환
    ///
    /// # Errors
    ///
    /// * `AuthenticationError(FederatedRejected)` - 사용자가 동의를 거부했거나 state가 유효하지 않음
    /// * `ExternalServiceError` - 프로바이더 통신 실패
    /// * `ConflictError` - 같은 이메일의 다른 계정이 존재
    pub async fn authenticate(
        &self,
        provider: FederatedProvider,
        query: OAuthCallbackQuery,
    ) -> AppResult<Account> {
        if let Some(error) = query.error.as_deref() {
            log::warn!(
                "{} 로그인 거부: {} ({})",
                provider.as_str(),
                error,
                query.error_description.as_deref().unwrap_or("-")
            );
            return Err(AuthFailure::FederatedRejected.into());
        }

        let (Some(code), Some(state)) = (query.code.as_deref(), query.state.as_deref()) else {
            log::warn!("{} 콜백에 code/state 누락", provider.as_str());
            return Err(AuthFailure::FederatedRejected.into());
        };

        let client = self.client(provider)?;

        self.tokens.verify_oauth_state(state, provider).map_err(|e| {
            log::warn!("{} 콜백 state 검증 실패: {}", provider.as_str(), e);
            AppError::from(AuthFailure::FederatedRejected)
        })?;

        let token = self.exchange_code_for_token(provider, client, code, state).await?;
        let profile = self.fetch_profile(provider, &token.access_token).await?;

        let account = self.users.find_or_create_federated(&profile).await?;
        log::info!("{} 로그인 성공: {}", provider.as_str(), account.username);
        Ok(account)
    }

    async fn exchange_code_for_token(
        &self,
        provider: FederatedProvider,
        client: &OAuthClientConfig,
        code: &str,
        state: &str,
    ) -> AppResult<OAuthTokenResponse> {
        let mut params = vec![
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", client.client_id.as_str()),
            ("redirect_uri", client.redirect_uri.as_str()),
        ];
        if let Some(secret) = client.client_secret.as_deref() {
            params.push(("client_secret", secret));
        }
        // 네이버는 토큰 요청에도 state를 요구합니다
        if provider == FederatedProvider::Naver {
            params.push(("state", state));
        }

        let response = self
            .http
            .post(provider.token_uri())
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 요청 실패: {}", provider.as_str(), e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 토큰 교환 실패 ({}): {}",
                provider.as_str(),
                status,
                error_text
            )));
        }

        response
            .json::<OAuthTokenResponse>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 토큰 응답 파싱 실패: {}", provider.as_str(), e)))
    }

    async fn fetch_profile(&self, provider: FederatedProvider, access_token: &str) -> AppResult<FederatedProfile> {
        let response = self
            .http
            .get(provider.profile_uri())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 요청 실패: {}", provider.as_str(), e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "{} 사용자 정보 조회 실패 ({}): {}",
                provider.as_str(),
                status,
                error_text
            )));
        }

        let body = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("{} 사용자 정보 파싱 실패: {}", provider.as_str(), e)))?;

        FederatedProfile::from_provider_json(provider, body).map_err(AppError::ExternalServiceError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;
    use crate::repositories::users::InMemoryUserRepository;
    use crate::services::auth::PasswordHasher;

    fn service() -> (FederatedAuthService, Arc<TokenService>) {
        let config = OAuthConfig {
            kakao: Some(OAuthClientConfig {
                client_id: "kakao-client".to_string(),
                client_secret: None,
                redirect_uri: "http://localhost:5001/api/auth/kakao/callback".to_string(),
            }),
            ..OAuthConfig::default()
        };
        let tokens = Arc::new(TokenService::new(&JwtConfig::new("federated-test")));
        let users = Arc::new(UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            PasswordHasher::new(4).unwrap(),
        ));

        (FederatedAuthService::new(config, tokens.clone(), users).unwrap(), tokens)
    }

    fn callback(code: Option<&str>, state: Option<&str>, error: Option<&str>) -> OAuthCallbackQuery {
        OAuthCallbackQuery {
            code: code.map(str::to_string),
            state: state.map(str::to_string),
            error: error.map(str::to_string),
            error_description: None,
        }
    }

    #[test]
    fn test_authorization_url_contains_signed_state() {
        let (service, tokens) = service();
        let url = service.authorization_url(FederatedProvider::Kakao).unwrap();

        assert!(url.starts_with("https://kauth.kakao.com/oauth/authorize?"));
        assert!(url.contains("client_id=kakao-client"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("redirect_uri=http%3A%2F%2Flocalhost%3A5001%2Fapi%2Fauth%2Fkakao%2Fcallback"));

        let state = url
            .split('&')
            .find_map(|pair| pair.strip_prefix("state="))
            .unwrap();
        assert!(tokens.verify_oauth_state(state, FederatedProvider::Kakao).is_ok());
    }

    #[test]
    fn test_disabled_provider_is_not_found() {
        let (service, _) = service();
        assert!(matches!(
            service.authorization_url(FederatedProvider::Google),
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_provider_error_is_rejected() {
        let (service, _) = service();
        let result = service
            .authenticate(FederatedProvider::Kakao, callback(None, None, Some("access_denied")))
            .await;

        assert!(matches!(
            result,
            Err(AppError::AuthenticationError(AuthFailure::FederatedRejected))
        ));
    }

    #[actix_web::test]
    async fn test_forged_or_foreign_state_is_rejected() {
        let (service, tokens) = service();

        let forged = service
            .authenticate(FederatedProvider::Kakao, callback(Some("code"), Some("forged"), None))
            .await;
        assert!(matches!(
            forged,
            Err(AppError::AuthenticationError(AuthFailure::FederatedRejected))
        ));

        let google_state = tokens
            .issue_oauth_state(FederatedProvider::Google, Duration::minutes(10))
            .unwrap();
        let foreign = service
            .authenticate(FederatedProvider::Kakao, callback(Some("code"), Some(&google_state), None))
            .await;
        assert!(matches!(
            foreign,
            Err(AppError::AuthenticationError(AuthFailure::FederatedRejected))
        ));
    }

    #[actix_web::test]
    async fn test_missing_code_is_rejected() {
        let (service, _) = service();
        let result = service
            .authenticate(FederatedProvider::Kakao, callback(None, Some("state"), None))
            .await;

        assert!(matches!(
            result,
            Err(AppError::AuthenticationError(AuthFailure::FederatedRejected))
        ));
    }

    #[actix_web::test]
    async fn test_unresponsive_provider_times_out() {
        // 연결은 받아 주지만 응답하지 않는 서버
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/token", listener.local_addr().unwrap());

        let http = FederatedAuthService::http_client(1).unwrap();
        let started = std::time::Instant::now();
        let err = http.get(&url).send().await.unwrap_err();

        assert!(err.is_timeout());
        assert!(started.elapsed() < StdDuration::from_secs(5));
        drop(listener);
    }
}
