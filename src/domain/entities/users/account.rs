//! Account Entity Implementation
//!
//! 로컬 가입 계정과 소셜 로그인 계정을 하나의 모델로 표현합니다.
//!
//! 자격 증명 불변식: `password_hash`는 `federated_identities`가 비어 있을 때에만
//! 존재하며, 비어 있을 때는 반드시 존재합니다. 생성자는 이 불변식을 만족하는
//! 값만 만들며, [`Account::has_consistent_credentials`]로 확인할 수 있습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use crate::config::FederatedProvider;
use crate::domain::models::auth::Role;

/// 프로바이더 → 프로바이더 발급 식별자
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FederatedIdentities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub naver: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kakao: Option<String>,
}

impl FederatedIdentities {
    pub fn get(&self, provider: FederatedProvider) -> Option<&str> {
        match provider {
            FederatedProvider::Google => self.google.as_deref(),
            FederatedProvider::Naver => self.naver.as_deref(),
            FederatedProvider::Kakao => self.kakao.as_deref(),
        }
    }

    pub fn set(&mut self, provider: FederatedProvider, subject: impl Into<String>) {
        let slot = match provider {
            FederatedProvider::Google => &mut self.google,
            FederatedProvider::Naver => &mut self.naver,
            FederatedProvider::Kakao => &mut self.kakao,
        };
        *slot = Some(subject.into());
    }

    pub fn is_empty(&self) -> bool {
        self.google.is_none() && self.naver.is_none() && self.kakao.is_none()
    }

    /// 연결된 프로바이더 목록
    pub fn providers(&self) -> Vec<FederatedProvider> {
        FederatedProvider::ALL
            .into_iter()
            .filter(|provider| self.get(*provider).is_some())
            .collect()
    }

    /// MongoDB 조회용 필드 경로 (`federated_identities.google` 등)
    pub fn field_path(provider: FederatedProvider) -> String {
        format!("federated_identities.{}", provider.as_str())
    }
}

/// 계정 엔티티
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    #[serde(default)]
    pub federated_identities: FederatedIdentities,
    /// 소셜 로그인으로 생성된 계정은 프로필 수정 전까지 비어 있습니다
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default)]
    pub role: Role,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Account {
    /// 로컬 가입 계정 생성
    pub fn new_local(
        username: String,
        email: Option<String>,
        password_hash: String,
        phone: String,
        address: String,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            username,
            email,
            password_hash: Some(password_hash),
            federated_identities: FederatedIdentities::default(),
            phone: Some(phone),
            address: Some(address),
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// 첫 소셜 로그인으로 계정 생성
    pub fn new_federated(
        username: String,
        email: Option<String>,
        provider: FederatedProvider,
        subject: String,
    ) -> Self {
        let now = DateTime::now();
        let mut federated_identities = FederatedIdentities::default();
        federated_identities.set(provider, subject);

        Self {
            id: None,
            username,
            email,
            password_hash: None, // 소셜 로그인 계정은 비밀번호 없음
            federated_identities,
            phone: None,
            address: None,
            role: Role::User,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_federated(&self) -> bool {
        !self.federated_identities.is_empty()
    }

    pub fn can_authenticate_with_password(&self) -> bool {
        self.password_hash.is_some() && self.has_consistent_credentials()
    }

    /// 비밀번호 해시 존재 여부와 외부 신원 존재 여부가 정확히 반대인지 확인
    pub fn has_consistent_credentials(&self) -> bool {
        self.password_hash.is_some() == self.federated_identities.is_empty()
    }
}
