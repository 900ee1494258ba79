//! 메모리 계정 저장소
//!
//! MongoDB 인덱스와 같은 유일성 규칙을 하나의 뮤텍스 안에서 검사하고 저장합니다.
//! 테스트와 DB 없는 로컬 실행에 사용합니다.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::config::FederatedProvider;
use crate::domain::entities::users::Account;
use crate::errors::{AppError, AppResult};
use crate::repositories::parse_object_id;
use crate::repositories::users::{ProfileChanges, UserStore};
use crate::services::validation::{DUPLICATE_EMAIL_MESSAGE, DUPLICATE_USERNAME_MESSAGE};

#[derive(Default)]
pub struct InMemoryUserRepository {
    accounts: Mutex<Vec<Account>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Vec<Account>>> {
        self.accounts
            .lock()
            .map_err(|_| AppError::InternalError("계정 저장소 잠금 실패".to_string()))
    }

    fn email_taken(accounts: &[Account], email: &str, except: Option<ObjectId>) -> bool {
        accounts
            .iter()
            .any(|a| a.id != except && a.email.as_deref() == Some(email))
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn insert(&self, mut account: Account) -> AppResult<Account> {
        let mut accounts = self.lock()?;

        if accounts.iter().any(|a| a.username == account.username) {
            return Err(AppError::duplicate("username", DUPLICATE_USERNAME_MESSAGE));
        }
        if let Some(email) = account.email.as_deref() {
            if Self::email_taken(&accounts, email, None) {
                return Err(AppError::duplicate("email", DUPLICATE_EMAIL_MESSAGE));
            }
        }
        for provider in account.federated_identities.providers() {
            let subject = account.federated_identities.get(provider);
            if accounts
                .iter()
                .any(|a| a.federated_identities.get(provider) == subject)
            {
                return Err(AppError::duplicate("federated_identities", "이미 연결된 소셜 계정입니다"));
            }
        }

        account.id = Some(ObjectId::new());
        accounts.push(account.clone());
        Ok(account)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Account>> {
        let object_id = parse_object_id(id)?;
        Ok(self.lock()?.iter().find(|a| a.id == Some(object_id)).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        Ok(self.lock()?.iter().find(|a| a.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        Ok(self
            .lock()?
            .iter()
            .find(|a| a.email.as_deref() == Some(email))
            .cloned())
    }

    async fn find_by_federated_id(
        &self,
        provider: FederatedProvider,
        subject: &str,
    ) -> AppResult<Option<Account>> {
        Ok(self
            .lock()?
            .iter()
            .find(|a| a.federated_identities.get(provider) == Some(subject))
            .cloned())
    }

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        Ok(self.lock()?.iter().any(|a| a.username == username))
    }

    async fn update_profile(&self, id: &str, changes: &ProfileChanges) -> AppResult<Option<Account>> {
        let object_id = parse_object_id(id)?;
        let mut accounts = self.lock()?;

        if let Some(email) = changes.email.as_deref() {
            if Self::email_taken(&accounts, email, Some(object_id)) {
                return Err(AppError::duplicate("email", DUPLICATE_EMAIL_MESSAGE));
            }
        }

        Ok(accounts
            .iter_mut()
            .find(|a| a.id == Some(object_id))
            .map(|account| {
                changes.apply_to(account);
                account.clone()
            }))
    }

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;
        let mut accounts = self.lock()?;

        match accounts.iter_mut().find(|a| a.id == Some(object_id)) {
            Some(account) => {
                account.password_hash = Some(password_hash.to_string());
                account.updated_at = mongodb::bson::DateTime::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;
        let mut accounts = self.lock()?;
        let before = accounts.len();
        accounts.retain(|a| a.id != Some(object_id));
        Ok(accounts.len() < before)
    }

    async fn list_newest_first(&self) -> AppResult<Vec<Account>> {
        let mut accounts = self.lock()?.clone();
        accounts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(accounts)
    }
}
