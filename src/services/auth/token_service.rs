//! 서명 토큰 발급/검증 서비스
//!
//! HS256으로 서명된 JWT만 다룹니다. 서명 없는 토큰이나 다른 알고리즘의 토큰은
//! 어떤 경우에도 받아들이지 않습니다.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{FederatedProvider, JwtConfig};
use crate::domain::entities::users::Account;
use crate::domain::models::auth::Role;
use crate::domain::models::token::{Claims, IssuedToken, SUPER_ADMIN_SUBJECT};
use crate::errors::{AppError, AppResult, AuthFailure, ErrorContext, TokenError};

const OAUTH_STATE_AUDIENCE: &str = "oauth-state";

/// 소셜 로그인 `state` 파라미터의 클레임
#[derive(Debug, Serialize, Deserialize)]
struct OAuthStateClaims {
    aud: String,
    provider: FederatedProvider,
    nonce: String,
    iat: i64,
    exp: i64,
}

/// 토큰 관리 서비스
///
/// 서명 비밀키와 유효 기간은 생성 시 [`JwtConfig`]로 주입됩니다.
///
/// # 예제
///
/// ```rust,ignore
/// let token_service = TokenService::new(&JwtConfig::from_env()?);
///
/// let issued = token_service.issue_user_token(&account)?;
/// let claims = token_service.verify(&issued.token)?;
/// assert_eq!(claims.subject(), account.id_string().unwrap());
/// ```
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    user_token_ttl: Duration,
    admin_token_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            user_token_ttl: config.user_token_ttl,
            admin_token_ttl: config.admin_token_ttl,
        }
    }

    /// 주체와 역할을 담은 토큰 발급
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - 서명 실패
    pub fn issue(&self, subject: &str, role: Role, ttl: Duration) -> AppResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + ttl;
        let claims = Claims::new(subject, role, now.timestamp(), expires_at.timestamp());

        let token = self.sign(&claims)?;
        Ok(IssuedToken { token, expires_at })
    }

    /// 계정 토큰 발급 (subject = 계정 ID)
    pub fn issue_user_token(&self, account: &Account) -> AppResult<IssuedToken> {
        let account_id = account
            .id_string()
            .ok_or_else(|| AppError::InternalError("계정 ID가 없습니다".to_string()))?;

        self.issue(&account_id, account.role, self.user_token_ttl)
    }

    /// 센티널 관리자 토큰 발급
    pub fn issue_admin_token(&self) -> AppResult<IssuedToken> {
        self.issue(SUPER_ADMIN_SUBJECT, Role::Admin, self.admin_token_ttl)
    }

    /// 토큰 검증 후 클레임 반환
    ///
    /// | 실패 원인 | 결과 |
    /// |-----------|------|
    /// | JWT 구조가 아님, 클레임 해석 실패 | `Malformed` |
    /// | 서명 불일치, 허용되지 않은 알고리즘 | `BadSignature` |
    /// | `exp` 경과 | `Expired` |
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        self.decode_with(token, &validation)
    }

    /// `Authorization` 헤더 값에서 토큰 부분 추출
    ///
    /// ```rust,ignore
    /// let token = TokenService::extract_bearer_token("Bearer eyJhbGciOi...")?;
    /// ```
    pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AuthFailure> {
        match auth_header.strip_prefix("Bearer ") {
            Some(token) if !token.trim().is_empty() => Ok(token.trim()),
            _ => Err(AuthFailure::InvalidHeader),
        }
    }

    /// 프로바이더에 묶인 일회성 `state` 값 발급
    pub fn issue_oauth_state(&self, provider: FederatedProvider, ttl: Duration) -> AppResult<String> {
        let now = Utc::now();
        let claims = OAuthStateClaims {
            aud: OAUTH_STATE_AUDIENCE.to_string(),
            provider,
            nonce: uuid::Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        self.sign(&claims)
    }

    /// `state` 값이 이 서버가 해당 프로바이더용으로 발급한 것인지 확인
    pub fn verify_oauth_state(&self, state: &str, provider: FederatedProvider) -> Result<(), TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_audience(&[OAUTH_STATE_AUDIENCE]);
        validation.set_required_spec_claims(&["exp", "aud"]);

        let claims: OAuthStateClaims = self.decode_with(state, &validation)?;
        if claims.provider != provider {
            return Err(TokenError::Malformed);
        }
        Ok(())
    }

    fn sign<T: Serialize>(&self, claims: &T) -> AppResult<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .context("토큰 생성 실패")
    }

    fn decode_with<T: DeserializeOwned>(&self, token: &str, validation: &Validation) -> Result<T, TokenError> {
        decode::<T>(token, &self.decoding_key, validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
                _ => TokenError::Malformed,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use mongodb::bson::oid::ObjectId;

    fn service() -> TokenService {
        TokenService::new(&JwtConfig::new("unit-test-secret"))
    }

    fn account_with_id(role: Role) -> Account {
        let mut account = Account::new_local(
            "shopper_01".to_string(),
            None,
            "$2b$04$hash".to_string(),
            "010-1234-5678".to_string(),
            "서울특별시 강남구 테헤란로 123".to_string(),
        );
        account.id = Some(ObjectId::new());
        account.role = role;
        account
    }

    /// 페이로드 중간 한 글자를 다른 문자로 교체
    fn tamper_payload(token: &str) -> String {
        let parts: Vec<&str> = token.split('.').collect();
        let mut payload: Vec<char> = parts[1].chars().collect();
        let middle = payload.len() / 2;
        payload[middle] = if payload[middle] == 'A' { 'B' } else { 'A' };
        let payload: String = payload.into_iter().collect();
        format!("{}.{}.{}", parts[0], payload, parts[2])
    }

    #[test]
    fn test_issue_then_verify_returns_subject_and_role() {
        let service = service();
        let issued = service.issue("65f1c0ffee0000000000beef", Role::User, Duration::hours(1)).unwrap();

        let claims = service.verify(&issued.token).unwrap();
        assert_eq!(claims.subject(), "65f1c0ffee0000000000beef");
        assert_eq!(claims.role(), Role::User);
        assert_eq!(claims.expires_at(), issued.expires_at.timestamp());
    }

    #[test]
    fn test_user_token_carries_account_id() {
        let service = service();
        let account = account_with_id(Role::Admin);

        let issued = service.issue_user_token(&account).unwrap();
        let claims = service.verify(&issued.token).unwrap();

        assert_eq!(Some(claims.subject().to_string()), account.id_string());
        assert_eq!(claims.role(), Role::Admin);
        assert!(!claims.is_super_admin());
    }

    #[test]
    fn test_user_token_requires_persisted_account() {
        let mut account = account_with_id(Role::User);
        account.id = None;

        assert!(matches!(service().issue_user_token(&account), Err(AppError::InternalError(_))));
    }

    #[test]
    fn test_admin_token_uses_sentinel_subject() {
        let service = service();
        let issued = service.issue_admin_token().unwrap();
        let claims = service.verify(&issued.token).unwrap();

        assert!(claims.is_super_admin());
        assert_eq!(claims.subject(), SUPER_ADMIN_SUBJECT);
        assert_eq!(claims.role(), Role::Admin);
    }

    #[test]
    fn test_expired_token() {
        let service = service();
        let issued = service.issue("someone", Role::User, Duration::seconds(-60)).unwrap();

        assert_eq!(service.verify(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn test_tampered_payload_is_bad_signature() {
        let service = service();
        let issued = service.issue("someone", Role::User, Duration::hours(1)).unwrap();

        let tampered = tamper_payload(&issued.token);
        assert_ne!(tampered, issued.token);
        assert_eq!(service.verify(&tampered), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let other = TokenService::new(&JwtConfig::new("another-secret"));
        let issued = other.issue("someone", Role::Admin, Duration::hours(1)).unwrap();

        assert_eq!(service().verify(&issued.token), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_unsigned_base64_blob_is_malformed() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let blob = STANDARD.encode(format!(r#"{{"id":"admin","role":"admin","exp":{}}}"#, exp));

        assert_eq!(service().verify(&blob), Err(TokenError::Malformed));
        assert_eq!(service().verify(""), Err(TokenError::Malformed));
        assert_eq!(service().verify("a.b.c"), Err(TokenError::Malformed));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(TokenService::extract_bearer_token("Bearer abc.def.ghi"), Ok("abc.def.ghi"));
        assert_eq!(TokenService::extract_bearer_token("Bearer "), Err(AuthFailure::InvalidHeader));
        assert_eq!(TokenService::extract_bearer_token("Basic dXNlcjpwdw=="), Err(AuthFailure::InvalidHeader));
        assert_eq!(TokenService::extract_bearer_token("abc.def.ghi"), Err(AuthFailure::InvalidHeader));
    }

    #[test]
    fn test_oauth_state_is_bound_to_provider() {
        let service = service();
        let state = service.issue_oauth_state(FederatedProvider::Kakao, Duration::minutes(10)).unwrap();

        assert!(service.verify_oauth_state(&state, FederatedProvider::Kakao).is_ok());
        assert!(service.verify_oauth_state(&state, FederatedProvider::Google).is_err());
        assert!(service.verify_oauth_state("forged", FederatedProvider::Kakao).is_err());
    }

    #[test]
    fn test_state_and_bearer_tokens_are_not_interchangeable() {
        let service = service();
        let state = service.issue_oauth_state(FederatedProvider::Naver, Duration::minutes(10)).unwrap();
        let bearer = service.issue_admin_token().unwrap();

        assert!(service.verify(&state).is_err());
        assert!(service.verify_oauth_state(&bearer.token, FederatedProvider::Naver).is_err());
    }
}
