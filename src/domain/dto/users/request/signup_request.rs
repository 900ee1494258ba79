//! 회원가입 요청

use serde::Deserialize;

use crate::services::validation::{Field, ValidatedRecord};
use crate::utils::string_utils::deserialize_optional_string;

/// 회원가입 요청
///
/// 누락된 필드는 빈 문자열로 받아 필드 검증 단계에서 "필수 입력 항목" 에러로
/// 돌려줍니다. 역직렬화 단계에서 요청 전체를 거절하지 않기 위함입니다.
///
/// # JSON 예제
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
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub username: String,

    /// 선택 항목. 빈 문자열은 `None`으로 처리됩니다.
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub email: Option<String>,

    pub password: String,
    pub phone: String,
    pub address: String,
}

impl ValidatedRecord for SignupRequest {
    fn field_values(&self) -> Vec<(Field, &str)> {
        vec![
            (Field::Username, self.username.as_str()),
            (Field::Email, self.email.as_deref().unwrap_or("")),
            (Field::Password, self.password.as_str()),
            (Field::Phone, self.phone.as_str()),
            (Field::Address, self.address.as_str()),
        ]
    }
}
