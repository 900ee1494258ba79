//! # 문자열 유틸리티
//!
//! 요청 DTO의 선택 문자열 필드를 정리합니다. 공백만 있는 값은 "값 없음"으로
//! 취급해 검증 규칙과 저장소가 빈 문자열을 보지 않도록 합니다.

use serde::Deserialize;

/// 선택 문자열 정리
///
/// 앞뒤 공백을 제거하고, 남는 것이 없으면 `None`을 반환합니다.
///
/// ```rust,ignore
/// assert_eq!(clean_optional_string(Some("  a@b.kr ".to_string())), Some("a@b.kr".to_string()));
/// assert_eq!(clean_optional_string(Some("   ".to_string())), None);
/// ```
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 선택 문자열 필드용 serde deserializer
///
/// `null`, 빈 문자열, 공백 문자열은 모두 `None`이 됩니다. 필드 자체가 없는 경우를
/// 허용하려면 `#[serde(default)]`와 함께 사용합니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct SignupRequest {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     email: Option<String>,
/// }
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct ContactForm {
        #[serde(default, deserialize_with = "deserialize_optional_string")]
        email: Option<String>,
    }

    fn email_of(json: &str) -> Option<String> {
        serde_json::from_str::<ContactForm>(json).unwrap().email
    }

    #[test]
    fn test_clean_optional_string() {
        assert_eq!(clean_optional_string(Some(" 서울 ".to_string())), Some("서울".to_string()));
        assert_eq!(clean_optional_string(Some("\t\n".to_string())), None);
        assert_eq!(clean_optional_string(None), None);
    }

    #[test]
    fn test_blank_email_becomes_none() {
        assert_eq!(email_of(r#"{"email": ""}"#), None);
        assert_eq!(email_of(r#"{"email": "   "}"#), None);
        assert_eq!(email_of(r#"{"email": null}"#), None);
        assert_eq!(email_of(r#"{}"#), None);
    }

    #[test]
    fn test_email_is_trimmed() {
        assert_eq!(
            email_of(r#"{"email": "  shopper@example.com "}"#),
            Some("shopper@example.com".to_string())
        );
    }

    #[test]
    fn test_non_string_is_rejected() {
        assert!(serde_json::from_str::<ContactForm>(r#"{"email": 42}"#).is_err());
    }
}
