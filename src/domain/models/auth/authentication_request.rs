use crate::domain::models::auth::Role;

/// 인증 모드를 정의하는 열거형
#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// 인증이 반드시 필요함
    Required,
    /// 인증이 선택사항임 (있으면 검증, 없어도 허용)
    Optional,
}

/// 요구되는 역할 정보
#[derive(Debug, Clone, PartialEq)]
pub enum RequiredRole {
    /// 특정 단일 역할이 필요
    Single(Role),
}

impl RequiredRole {
    pub fn admin() -> Self {
        RequiredRole::Single(Role::Admin)
    }

    /// 사용자 역할이 요구사항을 만족하는지 확인
    ///
    /// 관리자는 모든 역할 요구를 만족합니다.
    pub fn is_satisfied(&self, role: Role) -> bool {
        match role {
            Role::Admin => true,
            Role::User => match self {
                RequiredRole::Single(required) => *required == Role::User,
            },
        }
    }
}
