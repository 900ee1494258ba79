use mongodb::bson::DateTime;
use serde::Serialize;

use crate::config::FederatedProvider;
use crate::domain::entities::users::Account;
use crate::domain::models::auth::Role;
use crate::domain::models::token::SUPER_ADMIN_SUBJECT;

/// 공개 계정 정보
///
/// 비밀번호 해시와 프로바이더 식별자는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub role: Role,
    /// 연결된 소셜 로그인 프로바이더
    pub providers: Vec<FederatedProvider>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl UserResponse {
    /// 저장소 레코드가 없는 센티널 관리자의 프로필
    pub fn super_admin() -> Self {
        Self {
            id: SUPER_ADMIN_SUBJECT.to_string(),
            username: SUPER_ADMIN_SUBJECT.to_string(),
            email: None,
            phone: None,
            address: None,
            role: Role::Admin,
            providers: Vec::new(),
            created_at: None,
            updated_at: None,
        }
    }
}

fn format_timestamp(value: DateTime) -> Option<String> {
    value.try_to_rfc3339_string().ok()
}

impl From<Account> for UserResponse {
    fn from(account: Account) -> Self {
        let providers = account.federated_identities.providers();
        let Account {
            id,
            username,
            email,
            phone,
            address,
            role,
            created_at,
            updated_at,
            ..
        } = account;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            username,
            email,
            phone,
            address,
            role,
            providers,
            created_at: format_timestamp(created_at),
            updated_at: format_timestamp(updated_at),
        }
    }
}
