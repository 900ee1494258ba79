use serde::Deserialize;

use crate::repositories::users::ProfileChanges;
use crate::services::validation::{Field, ValidatedRecord};
use crate::utils::string_utils::deserialize_optional_string;

/// 프로필 수정 요청
///
/// 전달된 필드만 검증하고 변경합니다. 아이디와 역할은 수정할 수 없습니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileUpdateRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub address: Option<String>,
}

impl ProfileUpdateRequest {
    pub fn into_changes(self) -> ProfileChanges {
        ProfileChanges {
            email: self.email,
            phone: self.phone,
            address: self.address,
        }
    }
}

impl ValidatedRecord for ProfileUpdateRequest {
    fn field_values(&self) -> Vec<(Field, &str)> {
        [
            (Field::Email, self.email.as_deref()),
            (Field::Phone, self.phone.as_deref()),
            (Field::Address, self.address.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

/// 비밀번호 변경 요청
///
/// 본인 변경 시 `current_password`가 필요합니다. 관리자는 생략할 수 있습니다.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PasswordChangeRequest {
    pub current_password: Option<String>,
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::validation::validate_all;

    #[test]
    fn test_only_present_fields_are_validated() {
        let request: ProfileUpdateRequest = serde_json::from_str(r#"{"phone": "02-123-4567"}"#).unwrap();
        let errors = validate_all(&request);

        assert_eq!(errors.len(), 1);
        assert!(errors.contains("phone"));
    }

    #[test]
    fn test_into_changes() {
        let request: ProfileUpdateRequest =
            serde_json::from_str(r#"{"address": "부산광역시 해운대구 우동 1234"}"#).unwrap();
        let changes = request.into_changes();

        assert_eq!(changes.address.as_deref(), Some("부산광역시 해운대구 우동 1234"));
        assert!(changes.email.is_none());
        assert!(!changes.is_empty());
    }
}
