//! 비밀번호 해싱
//!
//! bcrypt로 솔트가 포함된 단방향 해시를 만들고 검증합니다. 저장된 해시가
//! 손상되어 있어도 검증은 에러 대신 `false`를 반환합니다.

use bcrypt::{hash, verify};

use crate::errors::{AppResult, ErrorContext};

const DUMMY_PASSWORD: &str = "storefront-timing-equalizer";

/// bcrypt 비밀번호 해셔
///
/// 비용(cost)은 생성 시 한 번 정해지며, 보통 [`PasswordConfig::bcrypt_cost`]에서
/// 읽은 값을 넘깁니다.
///
/// [`PasswordConfig::bcrypt_cost`]: crate::config::PasswordConfig::bcrypt_cost
///
/// # 예제
///
/// ```rust,ignore
/// let hasher = PasswordHasher::new(PasswordConfig::bcrypt_cost())?;
/// let stored = hasher.hash("Secret123!")?;
/// assert!(hasher.verify("Secret123!", &stored));
/// ```
#[derive(Clone)]
pub struct PasswordHasher {
    cost: u32,
    dummy_hash: String,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> AppResult<Self> {
        let dummy_hash = hash(DUMMY_PASSWORD, cost).context("비밀번호 해싱 실패")?;

        Ok(Self { cost, dummy_hash })
    }

    pub fn hash(&self, plaintext: &str) -> AppResult<String> {
        let start = std::time::Instant::now();
        let hashed = hash(plaintext, self.cost).context("비밀번호 해싱 실패")?;

        log::debug!("Password hashing took: {:?}", start.elapsed());
        Ok(hashed)
    }

    /// 평문과 저장된 해시 비교
    ///
    /// 해시 형식이 잘못된 경우에도 `false`
    pub fn verify(&self, plaintext: &str, secret_hash: &str) -> bool {
        match verify(plaintext, secret_hash) {
            Ok(valid) => valid,
            Err(e) => {
                log::error!("저장된 비밀번호 해시를 검증할 수 없습니다: {}", e);
                false
            }
        }
    }

    /// 계정이 없을 때도 같은 시간이 걸리도록 더미 해시로 검증을 수행
    pub fn verify_dummy(&self, plaintext: &str) {
        let _ = verify(plaintext, &self.dummy_hash);
    }
}
