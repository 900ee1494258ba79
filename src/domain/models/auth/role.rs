use serde::{Deserialize, Serialize};

/// 접근 등급
///
/// 문자열 비교 대신 이 열거형으로만 역할을 표현합니다. 역할 해석은
/// 접근 제어 게이트([`RequiredRole::is_satisfied`])에서만 이루어집니다.
///
/// [`RequiredRole::is_satisfied`]: crate::domain::models::auth::RequiredRole::is_satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}
