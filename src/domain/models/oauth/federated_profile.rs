//! # 소셜 로그인 프로필 모델
//!
//! 프로바이더마다 다른 사용자 정보 응답을 하나의 [`FederatedProfile`]로 정규화합니다.
//!
//! | 프로바이더 | 식별자 | 이메일 | 표시 이름 |
//! |-----------|--------|--------|-----------|
//! | Google | `id` | `email` | `name` |
//! | Naver | `response.id` | `response.email` | `response.nickname` / `response.name` |
//! | Kakao | `id` (숫자) | `kakao_account.email` | `kakao_account.profile.nickname` |

use serde::Deserialize;

use crate::config::FederatedProvider;

/// 토큰 엔드포인트 응답
#[derive(Debug, Deserialize)]
pub struct OAuthTokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

/// 정규화된 외부 신원 정보
#[derive(Debug, Clone, PartialEq)]
pub struct FederatedProfile {
    pub provider: FederatedProvider,
    /// 프로바이더가 발급한 사용자 식별자
    pub subject: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NaverEnvelope {
    resultcode: String,
    #[serde(default)]
    message: Option<String>,
    response: Option<NaverUserInfo>,
}

#[derive(Debug, Deserialize)]
struct NaverUserInfo {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    nickname: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct KakaoUserInfo {
    id: i64,
    #[serde(default)]
    kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Deserialize)]
struct KakaoAccount {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    profile: Option<KakaoProfile>,
}

#[derive(Debug, Deserialize)]
struct KakaoProfile {
    #[serde(default)]
    nickname: Option<String>,
}

impl FederatedProfile {
    /// 프로바이더별 사용자 정보 JSON을 정규화
    pub fn from_provider_json(provider: FederatedProvider, body: serde_json::Value) -> Result<Self, String> {
        match provider {
            FederatedProvider::Google => {
                let info: GoogleUserInfo = serde_json::from_value(body).map_err(|e| e.to_string())?;
                Ok(Self {
                    provider,
                    subject: info.id,
                    email: info.email,
                    display_name: info.name,
                })
            }
            FederatedProvider::Naver => {
                let envelope: NaverEnvelope = serde_json::from_value(body).map_err(|e| e.to_string())?;
                if envelope.resultcode != "00" {
                    return Err(format!(
                        "naver resultcode {}: {}",
                        envelope.resultcode,
                        envelope.message.unwrap_or_default()
                    ));
                }
                let info = envelope.response.ok_or_else(|| "naver response missing".to_string())?;
                Ok(Self {
                    provider,
                    subject: info.id,
                    email: info.email,
                    display_name: info.nickname.or(info.name),
                })
            }
            FederatedProvider::Kakao => {
                let info: KakaoUserInfo = serde_json::from_value(body).map_err(|e| e.to_string())?;
                let account = info.kakao_account;
                let email = account.as_ref().and_then(|a| a.email.clone());
                let display_name = account
                    .and_then(|a| a.profile)
                    .and_then(|p| p.nickname);
                Ok(Self {
                    provider,
                    subject: info.id.to_string(),
                    email,
                    display_name,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_google_profile() {
        let body = json!({"id": "1122", "email": "kim@gmail.com", "name": "Kim", "picture": "x"});
        let profile = FederatedProfile::from_provider_json(FederatedProvider::Google, body).unwrap();

        assert_eq!(profile.subject, "1122");
        assert_eq!(profile.email.as_deref(), Some("kim@gmail.com"));
        assert_eq!(profile.display_name.as_deref(), Some("Kim"));
    }

    #[test]
    fn test_naver_profile_and_error_code() {
        let ok = json!({
            "resultcode": "00",
            "message": "success",
            "response": {"id": "nv-77", "email": "lee@naver.com", "nickname": "lee"}
        });
        let profile = FederatedProfile::from_provider_json(FederatedProvider::Naver, ok).unwrap();
        assert_eq!(profile.subject, "nv-77");
        assert_eq!(profile.display_name.as_deref(), Some("lee"));

        let failed = json!({"resultcode": "024", "message": "Authentication failed"});
        assert!(FederatedProfile::from_provider_json(FederatedProvider::Naver, failed).is_err());
    }

    #[test]
    fn test_kakao_numeric_id() {
        let body = json!({
            "id": 3141592,
            "kakao_account": {"email": "park@kakao.com", "profile": {"nickname": "박"}}
        });
        let profile = FederatedProfile::from_provider_json(FederatedProvider::Kakao, body).unwrap();

        assert_eq!(profile.subject, "3141592");
        assert_eq!(profile.email.as_deref(), Some("park@kakao.com"));
        assert_eq!(profile.display_name.as_deref(), Some("박"));
    }

    #[test]
    fn test_kakao_without_account_scope() {
        let body = json!({"id": 42});
        let profile = FederatedProfile::from_provider_json(FederatedProvider::Kakao, body).unwrap();

        assert_eq!(profile.email, None);
        assert_eq!(profile.display_name, None);
    }
}
