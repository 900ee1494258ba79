//! # Authentication Configuration Module
//!
//! 토큰 서명, 관리자 자격 증명, 소셜 로그인 프로바이더 등 인증 관련 설정을 관리합니다.
//! 각 설정은 `main`에서 한 번 읽어 서비스 생성자에 명시적으로 전달되며,
//! 서비스 내부에서 환경 변수를 다시 읽지 않습니다.
//!
//! ## 필수 환경 변수 설정
//!
//! ### 토큰 설정
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_EXPIRATION_HOURS="24"
//! export ADMIN_TOKEN_EXPIRATION_HOURS="24"
//! ```
//!
//! ### 관리자 계정
//! ```bash
//! export ADMIN_USERNAME="admin"
//! export ADMIN_PASSWORD="change-me"
//! ```
//!
//! ### 소셜 로그인
//! ```bash
//! export GOOGLE_CLIENT_ID="..."
//! export GOOGLE_CLIENT_SECRET="..."
//! export GOOGLE_REDIRECT_URI="http://localhost:5001/api/auth/google/callback"
//! # NAVER_*, KAKAO_* 도 같은 형식
//! ```
//!
//! ## 사용 예제
//!
//! ```rust,ignore
//! use storefront_backend::config::{AdminConfig, JwtConfig, OAuthConfig};
//!
//! let jwt_config = JwtConfig::from_env()?;
//! let admin_config = AdminConfig::from_env();
//! let oauth_config = OAuthConfig::from_env();
//! ```

use std::env;
use std::fmt;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::config::Environment;
use crate::errors::AppError;

const DEV_FALLBACK_SECRET: &str = "storefront-dev-secret";

/// 토큰 서명 설정
#[derive(Clone)]
pub struct JwtConfig {
    /// HS256 서명 비밀키
    pub secret: String,
    /// 일반 사용자 토큰 유효 기간
    pub user_token_ttl: Duration,
    /// 관리자 토큰 유효 기간
    pub admin_token_ttl: Duration,
}

impl JwtConfig {
    /// 기본 유효 기간(24시간)으로 설정 생성
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            user_token_ttl: Duration::hours(24),
            admin_token_ttl: Duration::hours(24),
        }
    }

    /// 환경 변수에서 설정 로드
    ///
    /// 운영 환경에서 `JWT_SECRET`이 비어 있으면 에러를 반환합니다.
    /// 그 외 환경에서는 경고 후 개발용 비밀키를 사용합니다.
    pub fn from_env() -> Result<Self, AppError> {
        let secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if Environment::current().is_production() => {
                return Err(AppError::InternalError(
                    "운영 환경에서는 JWT_SECRET 설정이 필요합니다".to_string(),
                ));
            }
            _ => {
                log::warn!("JWT_SECRET not set, using default (not secure for production!)");
                DEV_FALLBACK_SECRET.to_string()
            }
        };

        Ok(Self {
            secret,
            user_token_ttl: Duration::hours(hours_from_env("JWT_EXPIRATION_HOURS", 24)),
            admin_token_ttl: Duration::hours(hours_from_env("ADMIN_TOKEN_EXPIRATION_HOURS", 24)),
        })
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"***")
            .field("user_token_ttl", &self.user_token_ttl)
            .field("admin_token_ttl", &self.admin_token_ttl)
            .finish()
    }
}

/// 토큰 유효 시간 상한(시간). 1년
const MAX_TOKEN_TTL_HOURS: i64 = 24 * 365;

fn hours_from_env(key: &str, default: i64) -> i64 {
    parse_ttl_hours(env::var(key).ok().as_deref(), default)
}

/// 양수만 받고 상한을 넘으면 상한으로 자릅니다
fn parse_ttl_hours(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|hours| *hours > 0)
        .map(|hours| hours.min(MAX_TOKEN_TTL_HOURS))
        .unwrap_or(default)
}

/// 저장소 밖에서 관리되는 관리자 자격 증명
///
/// 계정 저장소에 레코드가 없는 센티널 관리자(`admin`)를 인증할 때만 사용됩니다.
#[derive(Clone)]
pub struct AdminConfig {
    username: String,
    password: String,
}

impl AdminConfig {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `ADMIN_USERNAME` / `ADMIN_PASSWORD`가 모두 있을 때만 `Some`
    pub fn from_env() -> Option<Self> {
        match (env::var("ADMIN_USERNAME"), env::var("ADMIN_PASSWORD")) {
            (Ok(username), Ok(password)) if !username.is_empty() && !password.is_empty() => {
                Some(Self::new(username, password))
            }
            _ => {
                log::warn!("ADMIN_USERNAME/ADMIN_PASSWORD 미설정: 관리자 로그인이 비활성화됩니다");
                None
            }
        }
    }

    /// 상수 시간 비교로 자격 증명 확인
    ///
    /// 두 필드를 모두 비교한 뒤 결과를 합칩니다.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let username_ok = self.username.as_bytes().ct_eq(username.as_bytes());
        let password_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        (username_ok & password_ok).into()
    }
}

impl fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// 소셜 로그인 프로바이더
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FederatedProvider {
    Google,
    Naver,
    Kakao,
}

impl FederatedProvider {
    pub const ALL: [FederatedProvider; 3] = [
        FederatedProvider::Google,
        FederatedProvider::Naver,
        FederatedProvider::Kakao,
    ];

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "google" => Ok(FederatedProvider::Google),
            "naver" => Ok(FederatedProvider::Naver),
            "kakao" => Ok(FederatedProvider::Kakao),
            _ => Err(format!("지원하지 않는 인증 제공자입니다: {}", s)),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FederatedProvider::Google => "google",
            FederatedProvider::Naver => "naver",
            FederatedProvider::Kakao => "kakao",
        }
    }

    pub fn authorize_uri(&self) -> &'static str {
        match self {
            FederatedProvider::Google => "https://accounts.google.com/o/oauth2/v2/auth",
            FederatedProvider::Naver => "https://nid.naver.com/oauth2.0/authorize",
            FederatedProvider::Kakao => "https://kauth.kakao.com/oauth/authorize",
        }
    }

    pub fn token_uri(&self) -> &'static str {
        match self {
            FederatedProvider::Google => "https://oauth2.googleapis.com/token",
            FederatedProvider::Naver => "https://nid.naver.com/oauth2.0/token",
            FederatedProvider::Kakao => "https://kauth.kakao.com/oauth/token",
        }
    }

    pub fn profile_uri(&self) -> &'static str {
        match self {
            FederatedProvider::Google => "https://www.googleapis.com/oauth2/v2/userinfo",
            FederatedProvider::Naver => "https://openapi.naver.com/v1/nid/me",
            FederatedProvider::Kakao => "https://kapi.kakao.com/v2/user/me",
        }
    }

    /// 요청할 스코프. 네이버는 콘솔에서 지정하므로 비어 있습니다.
    pub fn scope(&self) -> Option<&'static str> {
        match self {
            FederatedProvider::Google => Some("email profile"),
            FederatedProvider::Naver => None,
            FederatedProvider::Kakao => Some("profile_nickname account_email"),
        }
    }
}

/// 프로바이더별 OAuth 클라이언트 자격 증명
#[derive(Clone)]
pub struct OAuthClientConfig {
    pub client_id: String,
    /// 카카오는 client secret 없이도 동작합니다
    pub client_secret: Option<String>,
    pub redirect_uri: String,
}

impl fmt::Debug for OAuthClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "***"))
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

/// 소셜 로그인 전체 설정
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub google: Option<OAuthClientConfig>,
    pub naver: Option<OAuthClientConfig>,
    pub kakao: Option<OAuthClientConfig>,
    /// state 파라미터 유효 시간(분)
    pub state_ttl_minutes: i64,
    /// 프로바이더 호출 전체 제한 시간(초). 연결 제한은 이 값과 5초 중 작은 값입니다.
    pub http_timeout_secs: u64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            google: None,
            naver: None,
            kakao: None,
            state_ttl_minutes: 10,
            http_timeout_secs: 10,
        }
    }
}

impl OAuthConfig {
    pub fn from_env() -> Self {
        let state_ttl_minutes = env::var("OAUTH_SESSION_TIMEOUT_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);
        let http_timeout_secs = env::var("OAUTH_HTTP_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|secs| (1..=60).contains(secs))
            .unwrap_or(10);

        Self {
            google: Self::client_from_env(FederatedProvider::Google),
            naver: Self::client_from_env(FederatedProvider::Naver),
            kakao: Self::client_from_env(FederatedProvider::Kakao),
            state_ttl_minutes,
            http_timeout_secs,
        }
    }

    fn client_from_env(provider: FederatedProvider) -> Option<OAuthClientConfig> {
        let prefix = provider.as_str().to_uppercase();
        let client_id = env::var(format!("{}_CLIENT_ID", prefix)).ok()?;
        let redirect_uri = env::var(format!("{}_REDIRECT_URI", prefix)).unwrap_or_else(|_| {
            format!("http://localhost:5001/api/auth/{}/callback", provider.as_str())
        });

        Some(OAuthClientConfig {
            client_id,
            client_secret: env::var(format!("{}_CLIENT_SECRET", prefix)).ok(),
            redirect_uri,
        })
    }

    /// 활성화된 프로바이더의 클라이언트 설정
    pub fn client(&self, provider: FederatedProvider) -> Option<&OAuthClientConfig> {
        match provider {
            FederatedProvider::Google => self.google.as_ref(),
            FederatedProvider::Naver => self.naver.as_ref(),
            FederatedProvider::Kakao => self.kakao.as_ref(),
        }
    }
}
