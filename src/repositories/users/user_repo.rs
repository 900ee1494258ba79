//! # 계정 리포지토리 (MongoDB)
//!
//! `accounts` 컬렉션에 대한 [`UserStore`] 구현입니다.
//!
//! ## 인덱스
//!
//! | 이름 | 키 | 옵션 |
//! |------|----|------|
//! | `username_unique` | `username` | unique |
//! | `email_unique` | `email` | unique, sparse |
//! | `federated_{provider}_unique` | `federated_identities.{provider}` | unique, sparse |
//! | `created_at_desc` | `created_at: -1` | |
//!
//! 유니크 인덱스가 동시 가입 경쟁의 최종 판정자입니다. 중복 키 에러(11000)는
//! 위반한 인덱스 이름으로 필드를 판별해 `AppError::DuplicateError`로 변환합니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::config::FederatedProvider;
use crate::db::Database;
use crate::domain::entities::users::{Account, FederatedIdentities};
use crate::errors::{AppError, AppResult};
use crate::repositories::users::{ProfileChanges, UserStore};
use crate::repositories::{duplicate_key_message, parse_object_id};
use crate::services::validation::{DUPLICATE_EMAIL_MESSAGE, DUPLICATE_USERNAME_MESSAGE};

const COLLECTION_NAME: &str = "accounts";

pub struct MongoUserRepository {
    db: Arc<Database>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Account> {
        self.db.collection::<Account>(COLLECTION_NAME)
    }

    /// MongoDB 에러를 애플리케이션 에러로 변환
    ///
    /// 중복 키 에러는 위반한 인덱스에 따라 필드별 중복 에러가 됩니다.
    fn map_error(err: mongodb::error::Error) -> AppError {
        duplicate_key_message(&err)
            .and_then(duplicate_error_for)
            .unwrap_or_else(|| AppError::DatabaseError(err.to_string()))
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("username_unique".to_string())
                .build())
            .build();

        // 이메일은 선택 항목이므로 sparse
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .sparse(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        let mut indexes = vec![username_index, email_index, created_at_index];

        for provider in FederatedProvider::ALL {
            let mut keys = Document::new();
            keys.insert(FederatedIdentities::field_path(provider), 1);
            indexes.push(
                IndexModel::builder()
                    .keys(keys)
                    .options(IndexOptions::builder()
                        .unique(true)
                        .sparse(true)
                        .name(format!("federated_{}_unique", provider.as_str()))
                        .build())
                    .build(),
            );
        }

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        log::info!("✅ accounts 인덱스 생성 완료");
        Ok(())
    }

    async fn find_one(&self, filter: Document) -> AppResult<Option<Account>> {
        self.collection()
            .find_one(filter)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

/// E11000 메시지에서 위반한 인덱스 이름 추출
///
/// `E11000 duplicate key error collection: shop.accounts index: email_unique dup key: { ... }`
fn violated_index(message: &str) -> Option<&str> {
    let (_, rest) = message.split_once("index: ")?;
    rest.split_whitespace().next()
}

/// 위반한 인덱스에 해당하는 필드별 중복 에러. 모르는 인덱스면 `None`
fn duplicate_error_for(message: &str) -> Option<AppError> {
    match violated_index(message)? {
        "username_unique" => Some(AppError::duplicate("username", DUPLICATE_USERNAME_MESSAGE)),
        "email_unique" => Some(AppError::duplicate("email", DUPLICATE_EMAIL_MESSAGE)),
        index if index.starts_with("federated_") => {
            Some(AppError::duplicate("federated_identities", "이미 연결된 소셜 계정입니다"))
        }
        _ => None,
    }
}

#[async_trait]
impl UserStore for MongoUserRepository {
    async fn init(&self) -> AppResult<()> {
        self.create_indexes().await
    }

    async fn insert(&self, mut account: Account) -> AppResult<Account> {
        let result = self.collection()
            .insert_one(&account)
            .await
            .map_err(Self::map_error)?;

        let inserted_id = result.inserted_id.as_object_id().ok_or_else(|| {
            AppError::DatabaseError("삽입된 문서의 ID가 ObjectId가 아닙니다".to_string())
        })?;
        account.id = Some(inserted_id);

        Ok(account)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Account>> {
        let object_id = parse_object_id(id)?;
        self.find_one(doc! { "_id": object_id }).await
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<Account>> {
        self.find_one(doc! { "username": username }).await
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<Account>> {
        self.find_one(doc! { "email": email }).await
    }

    async fn find_by_federated_id(
        &self,
        provider: FederatedProvider,
        subject: &str,
    ) -> AppResult<Option<Account>> {
        let mut filter = Document::new();
        filter.insert(FederatedIdentities::field_path(provider), subject);
        self.find_one(filter).await
    }

    async fn exists_by_username(&self, username: &str) -> AppResult<bool> {
        let count = self.collection()
            .count_documents(doc! { "username": username })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(count > 0)
    }

    async fn update_profile(&self, id: &str, changes: &ProfileChanges) -> AppResult<Option<Account>> {
        let object_id = parse_object_id(id)?;

        let mut set = doc! { "updated_at": DateTime::now() };
        if let Some(email) = &changes.email {
            set.insert("email", email.as_str());
        }
        if let Some(phone) = &changes.phone {
            set.insert("phone", phone.as_str());
        }
        if let Some(address) = &changes.address {
            set.insert("address", address.as_str());
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set })
            .with_options(options)
            .await
            .map_err(Self::map_error)
    }

    async fn update_password_hash(&self, id: &str, password_hash: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;

        let result = self.collection()
            .update_one(
                doc! { "_id": object_id },
                doc! { "$set": { "password_hash": password_hash, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;

        let result = self.collection()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn list_newest_first(&self) -> AppResult<Vec<Account>> {
        let cursor = self.collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
