//! 계정 저장소 계약

use async_trait::async_trait;
use mongodb::bson::DateTime;

use crate::config::FederatedProvider;
use crate::domain::entities::users::Account;
use crate::errors::AppResult;
use crate::services::validation::UsernameProbe;

/// 프로필 수정 내용. `None` 필드는 변경하지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none() && self.address.is_none()
    }

    pub fn apply_to(&self, account: &mut Account) {
        if let Some(email) = &self.email {
            account.email = Some(email.clone());
        }
        if let Some(phone) = &self.phone {
            account.phone = Some(phone.clone());
        }
        if let Some(address) = &self.address {
            account.address = Some(address.clone());
        }
        account.updated_at = DateTime::now();
    }
}

/// 계정 저장소
///
/// 아이디와 이메일(존재할 때) 유일성은 저장소가 최종적으로 보장합니다.
/// `insert`/`update_profile`은 충돌 시 충돌한 필드를 담은
/// `AppError::DuplicateError`를 반환합니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 인덱스 생성 등 초기화 작업
    async fn init(&self) -> AppResult<()> {
        Ok(())
    }

    /// 새 계정 저장. ID가 할당된 계정을 반환합니다.
    async fn insert(&self, account: Account) -> AppResult<Account>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Account>>;

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>>;

    async fn find_by_federated_id(
        &self,
        provider: FederatedProvider,
        subject: &str,
    ) -> AppResult<Option<Account>>;

    async fn exists_by_username(&self, username: &str) -> AppResult<bool>;

    async fn update_profile(&self, id: &str, changes: &ProfileChanges) -> AppResult<Option<Account>>;

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> AppResult<bool>;

    /// 영구 삭제. 삭제된 레코드가 있으면 `true`
    async fn delete(&self, id: &str) -> AppResult<bool>;

    /// 전체 계정, 최근 가입 순
    async fn list_newest_first(&self) -> AppResult<Vec<Account>>;
}

#[async_trait]
impl<S> UsernameProbe for S
where
    S: UserStore + ?Sized,
{
    async fn username_exists(&self, username: &str) -> AppResult<bool> {
        self.exists_by_username(username).await
    }
}
