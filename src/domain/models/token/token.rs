//! 서명 토큰 클레임과 발급 결과
//!
//! 클레임은 토큰 검증(`TokenService::verify`)을 통과한 경우에만 외부로 전달되며,
//! 크레이트 밖에서는 임의로 생성할 수 없습니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::models::auth::Role;

/// 저장소 레코드 없이 인증되는 센티널 관리자의 subject
pub const SUPER_ADMIN_SUBJECT: &str = "admin";

/// 토큰의 클레임(Payload) 구조체
///
/// - `sub`: 토큰의 주체 (계정 ID 또는 센티널 `admin`)
/// - `role`: 접근 등급
/// - `iat`: 발급 시각 (Unix timestamp)
/// - `exp`: 만료 시각 (Unix timestamp)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    sub: String,
    role: Role,
    iat: i64,
    exp: i64,
}

impl Claims {
    pub(crate) fn new(sub: impl Into<String>, role: Role, iat: i64, exp: i64) -> Self {
        Self {
            sub: sub.into(),
            role,
            iat,
            exp,
        }
    }

    pub fn subject(&self) -> &str {
        &self.sub
    }

    pub fn role(&self) -> Role {
        self.role
    }

    #[cfg(test)]
    pub fn expires_at(&self) -> i64 {
        self.exp
    }

    /// 센티널 관리자 토큰인지 여부
    pub fn is_super_admin(&self) -> bool {
        self.sub == SUPER_ADMIN_SUBJECT
    }
}

/// 발급된 토큰과 만료 메타데이터
#[derive(Debug, Clone, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}
