//! # 계정 관리 서비스
//!
//! 계정의 생성, 인증, 조회, 수정, 삭제를 담당합니다.
//!
//! ```text
//! SignupRequest ─▶ validate_all ─▶ 아이디 사전 확인 ─▶ bcrypt ─▶ UserStore::insert
//!                      │                 │ (조회 실패 시 통과)          │
//!                      ▼                 ▼                             ▼
//!               ValidationError    DuplicateError            DuplicateError (저장소 제약)
//! ```
//!
//! 아이디/이메일 유일성의 최종 판단은 저장소 제약이 담당합니다. 사전 확인은
//! 사용자 피드백용이며, 동시에 같은 아이디로 가입하면 저장소가 두 번째 쓰기를
//! 거절하고 그 결과가 `DuplicateError`로 전달됩니다.

use std::sync::Arc;

use crate::domain::dto::users::{PasswordChangeRequest, ProfileUpdateRequest, SignupRequest};
use crate::domain::entities::users::Account;
use crate::domain::models::oauth::FederatedProfile;
use crate::errors::{AppError, AppResult, AuthFailure};
use crate::repositories::users::UserStore;
use crate::services::auth::PasswordHasher;
use crate::services::validation::{self, check_username_available, validate_all, Field};

const USERNAME_MAX_LENGTH: usize = 20;
const USERNAME_ATTEMPTS: usize = 5;

/// 계정 관리 비즈니스 로직 서비스
///
/// 저장소와 해셔는 생성 시 주입됩니다. 운영에서는 `MongoUserRepository`,
/// 테스트에서는 `InMemoryUserRepository`를 사용합니다.
///
/// # 예제
///
/// ```rust,ignore
/// let store: Arc<dyn UserStore> = Arc::new(MongoUserRepository::new(database));
/// let users = UserService::new(store, PasswordHasher::new(PasswordConfig::bcrypt_cost())?);
///
/// let account = users.create_account(request).await?;
/// ```
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hasher: PasswordHasher) -> Self {
        Self { store, hasher }
    }

    /// 로컬 계정 생성
    ///
    /// # Errors
    ///
    /// * `AppError::ValidationError` - 규칙을 위반한 필드 전체
    /// * `AppError::DuplicateError` - 아이디 또는 이메일 충돌
    pub async fn create_account(&self, request: SignupRequest) -> AppResult<Account> {
        let start_time = std::time::Instant::now();

        validate_all(&request).into_result()?;

        let username = request.username.trim().to_string();
        if let Some(message) = check_username_available(&*self.store, &username).await {
            return Err(AppError::duplicate(Field::Username.as_str(), message));
        }

        let password_hash = self.hasher.hash(&request.password)?;
        let account = Account::new_local(
            username,
            request.email.map(|email| email.trim().to_string()),
            password_hash,
            request.phone.trim().to_string(),
            request.address.trim().to_string(),
        );

        let created = self.store.insert(account).await?;

        log::info!(
            "계정 생성 완료: {} ({:?})",
            created.username,
            start_time.elapsed()
        );
        Ok(created)
    }

    /// 아이디 사용 가능 여부
    ///
    /// 형식이 잘못된 아이디는 `ValidationError`입니다. 저장소 조회가 실패하면
    /// 사용 가능으로 응답합니다.
    pub async fn is_username_available(&self, username: &str) -> AppResult<bool> {
        if let Some(message) = validation::validate(Field::Username, username) {
            return Err(AppError::validation(Field::Username.as_str(), message));
        }

        Ok(check_username_available(&*self.store, username).await.is_none())
    }

    /// 아이디 또는 이메일과 비밀번호로 계정 인증
    ///
    /// 계정이 없을 때, 비밀번호가 틀렸을 때, 비밀번호가 없는 소셜 계정일 때 모두
    /// 같은 `AuthFailure::InvalidCredentials`를 반환합니다.
    pub async fn authenticate(&self, identifier: &str, password: &str) -> AppResult<Account> {
        let identifier = identifier.trim();
        let account = if identifier.contains('@') {
            self.store.find_by_email(identifier).await?
        } else {
            self.store.find_by_username(identifier).await?
        };

        let Some(account) = account else {
            self.hasher.verify_dummy(password);
            log::warn!("로그인 실패: 계정 없음");
            return Err(AuthFailure::InvalidCredentials.into());
        };

        let verified = match account.password_hash.as_deref() {
            Some(secret_hash) if account.can_authenticate_with_password() => {
                self.hasher.verify(password, secret_hash)
            }
            _ => {
                self.hasher.verify_dummy(password);
                false
            }
        };

        if !verified {
            log::warn!("로그인 실패: {}", account.username);
            return Err(AuthFailure::InvalidCredentials.into());
        }

        Ok(account)
    }

    pub async fn get_account(&self, id: &str) -> AppResult<Account> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다.".to_string()))
    }

    /// 전체 계정, 최근 가입 순
    pub async fn list_accounts(&self) -> AppResult<Vec<Account>> {
        self.store.list_newest_first().await
    }

    /// 이메일/연락처/주소 수정
    ///
    /// 전달된 필드만 가입 규칙으로 다시 검증합니다.
    pub async fn update_profile(&self, id: &str, request: ProfileUpdateRequest) -> AppResult<Account> {
        validate_all(&request).into_result()?;

        let changes = request.into_changes();
        if changes.is_empty() {
            return self.get_account(id).await;
        }

        self.store
            .update_profile(id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다.".to_string()))
    }

    /// 비밀번호 변경
    ///
    /// `require_current`가 참이면 현재 비밀번호가 일치해야 합니다.
    /// 비밀번호가 없는 소셜 계정은 변경할 수 없습니다.
    pub async fn change_password(
        &self,
        id: &str,
        request: PasswordChangeRequest,
        require_current: bool,
    ) -> AppResult<()> {
        if let Some(message) = validation::validate(Field::Password, &request.new_password) {
            return Err(AppError::validation("new_password", message));
        }

        let account = self.get_account(id).await?;
        let current_hash = match account.password_hash.as_deref() {
            Some(current_hash) if !account.is_federated() => current_hash,
            _ => return Err(AppError::validation(
                "password",
                "소셜 로그인 계정은 비밀번호를 변경할 수 없습니다",
            )),
        };

        if require_current {
            let current = request.current_password.as_deref().unwrap_or("");
            if !self.hasher.verify(current, current_hash) {
                return Err(AppError::validation("current_password", "현재 비밀번호가 일치하지 않습니다"));
            }
        }

        let new_hash = self.hasher.hash(&request.new_password)?;
        if !self.store.update_password_hash(id, &new_hash).await? {
            return Err(AppError::NotFound("사용자를 찾을 수 없습니다.".to_string()));
        }

        log::info!("비밀번호 변경: {}", account.username);
        Ok(())
    }

    /// 계정 영구 삭제
    pub async fn delete_account(&self, id: &str) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound("해당 회원을 찾을 수 없습니다.".to_string()));
        }

        log::info!("계정 삭제: {}", id);
        Ok(())
    }

    /// 소셜 로그인 계정 조회, 없으면 생성
    ///
    /// 같은 이메일의 계정이 이미 있으면 자동으로 연결하지 않고 `ConflictError`를
    /// 반환합니다. 프로바이더가 준 이메일이 이메일 규칙에 맞지 않으면 저장하지 않습니다.
    pub async fn find_or_create_federated(&self, profile: &FederatedProfile) -> AppResult<Account> {
        if let Some(account) = self
            .store
            .find_by_federated_id(profile.provider, &profile.subject)
            .await?
        {
            return Ok(account);
        }

        let email = profile
            .email
            .as_deref()
            .filter(|email| match validation::validate(Field::Email, email) {
                None => true,
                Some(_) => {
                    log::warn!("{} 프로필 이메일이 형식에 맞지 않아 저장하지 않습니다", profile.provider.as_str());
                    false
                }
            });

        if let Some(email) = email {
            if self.store.find_by_email(email).await?.is_some() {
                return Err(AppError::ConflictError(
                    "이미 같은 이메일로 가입된 계정이 있습니다. 기존 계정으로 로그인해주세요.".to_string(),
                ));
            }
        }

        let base = username_base(profile);
        for attempt in 0..USERNAME_ATTEMPTS {
            let candidate = username_candidate(&base, attempt);
            if self.store.exists_by_username(&candidate).await? {
                continue;
            }

            let account = Account::new_federated(
                candidate,
                email.map(str::to_string),
                profile.provider,
                profile.subject.clone(),
            );

            match self.store.insert(account).await {
                Ok(created) => {
                    log::info!(
                        "소셜 계정 생성: {} ({})",
                        created.username,
                        profile.provider.as_str()
                    );
                    return Ok(created);
                }
                // 확인과 저장 사이에 다른 요청이 같은 아이디를 가져간 경우
                Err(AppError::DuplicateError(fields)) if fields.contains(Field::Username.as_str()) => continue,
                Err(e) => return Err(e),
            }
        }

        Err(AppError::InternalError(format!(
            "사용 가능한 아이디를 만들지 못했습니다: {}",
            base
        )))
    }
}

/// 표시 이름이나 이메일에서 아이디 후보의 기본 부분을 만듭니다
///
/// 영문/숫자/밑줄만 남기며, 4자 미만이면 `{provider}_{subject}`를 사용합니다.
fn username_base(profile: &FederatedProfile) -> String {
    let source = profile
        .display_name
        .as_deref()
        .or_else(|| profile.email.as_deref().and_then(|email| email.split('@').next()))
        .unwrap_or("");

    let sanitized = sanitize(source);
    if sanitized.len() >= 4 {
        return sanitized;
    }

    sanitize(&format!("{}_{}", profile.provider.as_str(), profile.subject))
}

fn sanitize(source: &str) -> String {
    source
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .take(USERNAME_MAX_LENGTH)
        .collect()
}

/// 첫 시도는 기본 이름, 이후에는 임의의 접미사를 붙입니다
fn username_candidate(base: &str, attempt: usize) -> String {
    if attempt == 0 {
        return base.to_string();
    }

    let suffix = uuid::Uuid::new_v4().simple().to_string()[..6].to_string();
    let keep = USERNAME_MAX_LENGTH - suffix.len() - 1;
    let prefix: String = base.chars().take(keep).collect();
    format!("{}_{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FederatedProvider;
    use crate::repositories::users::InMemoryUserRepository;

    fn service() -> UserService {
        UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            PasswordHasher::new(4).unwrap(),
        )
    }

    fn signup(username: &str) -> SignupRequest {
        SignupRequest {
            username: username.to_string(),
            email: Some(format!("{}@example.com", username)),
            password: "Secret123!".to_string(),
            phone: "010-1234-5678".to_string(),
            address: "서울특별시 강남구 테헤란로 123".to_string(),
        }
    }

    fn profile(provider: FederatedProvider, subject: &str, name: Option<&str>) -> FederatedProfile {
        FederatedProfile {
            provider,
            subject: subject.to_string(),
            email: None,
            display_name: name.map(str::to_string),
        }
    }

    #[actix_web::test]
    async fn test_create_account_hashes_password() {
        let service = service();
        let account = service.create_account(signup("shopper_01")).await.unwrap();

        assert!(account.id.is_some());
        assert!(!account.is_federated());
        assert!(account.has_consistent_credentials());
        assert_ne!(account.password_hash.as_deref(), Some("Secret123!"));
    }

    #[actix_web::test]
    async fn test_create_account_reports_every_invalid_field() {
        let service = service();
        let mut request = signup("ab1");
        request.phone = "02-123-4567".to_string();

        let err = service.create_account(request).await.unwrap_err();
        match err {
            AppError::ValidationError(fields) => {
                assert!(fields.contains("username"));
                assert!(fields.contains("phone"));
                assert!(!fields.contains("password"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[actix_web::test]
    async fn test_duplicate_username_is_duplicate_error() {
        let service = service();
        service.create_account(signup("shopper_01")).await.unwrap();

        let mut second = signup("shopper_01");
        second.email = Some("other@example.com".to_string());

        assert!(matches!(
            service.create_account(second).await,
            Err(AppError::DuplicateError(fields)) if fields.contains("username")
        ));
    }

    #[actix_web::test]
    async fn test_duplicate_email_is_duplicate_error() {
        let service = service();
        service.create_account(signup("shopper_01")).await.unwrap();

        let mut second = signup("shopper_02");
        second.email = Some("shopper_01@example.com".to_string());

        assert!(matches!(
            service.create_account(second).await,
            Err(AppError::DuplicateError(fields)) if fields.contains("email")
        ));
    }

    #[actix_web::test]
    async fn test_username_availability() {
        let service = service();
        service.create_account(signup("shopper_01")).await.unwrap();

        assert!(!service.is_username_available("shopper_01").await.unwrap());
        assert!(service.is_username_available("shopper_02").await.unwrap());
        assert!(matches!(
            service.is_username_available("ab").await,
            Err(AppError::ValidationError(_))
        ));
    }

    #[actix_web::test]
    async fn test_authenticate_by_username_or_email() {
        let service = service();
        let created = service.create_account(signup("shopper_01")).await.unwrap();

        let by_username = service.authenticate("shopper_01", "Secret123!").await.unwrap();
        let by_email = service.authenticate("shopper_01@example.com", "Secret123!").await.unwrap();

        assert_eq!(by_username.id, created.id);
        assert_eq!(by_email.id, created.id);
    }

    #[actix_web::test]
    async fn test_authenticate_failures_are_indistinguishable() {
        let service = service();
        service.create_account(signup("shopper_01")).await.unwrap();
        service
            .find_or_create_federated(&profile(FederatedProvider::Google, "g-1", Some("googler")))
            .await
            .unwrap();

        for (identifier, password) in [
            ("shopper_01", "Wrong123!"),
            ("nobody_here", "Secret123!"),
            ("googler", "Secret123!"),
        ] {
            let err = service.authenticate(identifier, password).await.unwrap_err();
            assert!(matches!(
                err,
                AppError::AuthenticationError(AuthFailure::InvalidCredentials)
            ));
        }
    }

    #[actix_web::test]
    async fn test_update_profile_revalidates_fields() {
        let service = service();
        let account = service.create_account(signup("shopper_01")).await.unwrap();
        let id = account.id_string().unwrap();

        let bad = ProfileUpdateRequest {
            phone: Some("02-123-4567".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update_profile(&id, bad).await,
            Err(AppError::ValidationError(_))
        ));

        let good = ProfileUpdateRequest {
            phone: Some("01098765432".to_string()),
            ..Default::default()
        };
        let updated = service.update_profile(&id, good).await.unwrap();
        assert_eq!(updated.phone.as_deref(), Some("01098765432"));
        assert_eq!(updated.address, account.address);
    }

    #[actix_web::test]
    async fn test_change_password_requires_current_password() {
        let service = service();
        let account = service.create_account(signup("shopper_01")).await.unwrap();
        let id = account.id_string().unwrap();

        let wrong = PasswordChangeRequest {
            current_password: Some("Wrong123!".to_string()),
            new_password: "Changed123!".to_string(),
        };
        assert!(matches!(
            service.change_password(&id, wrong, true).await,
            Err(AppError::ValidationError(fields)) if fields.contains("current_password")
        ));

        let right = PasswordChangeRequest {
            current_password: Some("Secret123!".to_string()),
            new_password: "Changed123!".to_string(),
        };
        service.change_password(&id, right, true).await.unwrap();

        assert!(service.authenticate("shopper_01", "Changed123!").await.is_ok());
        assert!(service.authenticate("shopper_01", "Secret123!").await.is_err());
    }

    #[actix_web::test]
    async fn test_change_password_validates_new_password() {
        let service = service();
        let account = service.create_account(signup("shopper_01")).await.unwrap();

        let weak = PasswordChangeRequest {
            current_password: None,
            new_password: "weakpass".to_string(),
        };
        assert!(matches!(
            service.change_password(&account.id_string().unwrap(), weak, false).await,
            Err(AppError::ValidationError(fields)) if fields.contains("new_password")
        ));
    }

    #[actix_web::test]
    async fn test_federated_account_cannot_set_password() {
        let service = service();
        let account = service
            .find_or_create_federated(&profile(FederatedProvider::Naver, "n-1", Some("naver_user")))
            .await
            .unwrap();

        let request = PasswordChangeRequest {
            current_password: None,
            new_password: "Secret123!".to_string(),
        };
        assert!(matches!(
            service.change_password(&account.id_string().unwrap(), request, false).await,
            Err(AppError::ValidationError(fields)) if fields.contains("password")
        ));
    }

    #[actix_web::test]
    async fn test_delete_account() {
        let service = service();
        let account = service.create_account(signup("shopper_01")).await.unwrap();
        let id = account.id_string().unwrap();

        service.delete_account(&id).await.unwrap();
        assert!(matches!(service.get_account(&id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete_account(&id).await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_find_or_create_federated_is_idempotent() {
        let service = service();
        let first = service
            .find_or_create_federated(&profile(FederatedProvider::Kakao, "12345", Some("카카오 유저")))
            .await
            .unwrap();
        let second = service
            .find_or_create_federated(&profile(FederatedProvider::Kakao, "12345", Some("다른 이름")))
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert!(first.is_federated());
        assert!(first.password_hash.is_none());
        assert!(validation::validate(Field::Username, &first.username).is_none());
    }

    #[actix_web::test]
    async fn test_federated_username_collision_gets_suffix() {
        let service = service();
        service.create_account(signup("googler")).await.unwrap();

        let account = service
            .find_or_create_federated(&profile(FederatedProvider::Google, "g-2", Some("googler")))
            .await
            .unwrap();

        assert_ne!(account.username, "googler");
        assert!(account.username.starts_with("googler_"));
        assert!(validation::validate(Field::Username, &account.username).is_none());
    }

    #[actix_web::test]
    async fn test_federated_email_collision_is_conflict() {
        let service = service();
        service.create_account(signup("shopper_01")).await.unwrap();

        let mut google = profile(FederatedProvider::Google, "g-3", Some("someone"));
        google.email = Some("shopper_01@example.com".to_string());

        assert!(matches!(
            service.find_or_create_federated(&google).await,
            Err(AppError::ConflictError(_))
        ));
    }

    #[actix_web::test]
    async fn test_federated_email_failing_rule_is_dropped() {
        let service = service();

        let mut google = profile(FederatedProvider::Google, "g-4", Some("techie"));
        google.email = Some("techie@startup.technology".to_string());
        let account = service.find_or_create_federated(&google).await.unwrap();
        assert_eq!(account.email, None);

        let mut kakao = profile(FederatedProvider::Kakao, "k-5", Some("buyer"));
        kakao.email = Some("buyer@shop.kr".to_string());
        let account = service.find_or_create_federated(&kakao).await.unwrap();
        assert_eq!(account.email.as_deref(), Some("buyer@shop.kr"));
    }

    #[test]
    fn test_username_base_sanitizes_and_falls_back() {
        let named = profile(FederatedProvider::Google, "g-1", Some("John Doe!"));
        assert_eq!(username_base(&named), "JohnDoe");

        let unnamed = profile(FederatedProvider::Kakao, "998877", Some("홍길동"));
        assert_eq!(username_base(&unnamed), "kakao_998877");

        let long = profile(FederatedProvider::Naver, "n", Some("averyveryverylongdisplayname"));
        assert_eq!(username_base(&long).len(), USERNAME_MAX_LENGTH);
    }

    #[test]
    fn test_username_candidate_fits_pattern() {
        let candidate = username_candidate("averyveryverylongname", 2);
        assert!(candidate.len() <= USERNAME_MAX_LENGTH);
        assert!(validation::validate(Field::Username, &candidate).is_none());
    }
}
