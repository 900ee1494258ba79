use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::domain::models::auth::{RequiredRole, Role};
use crate::domain::models::token::Claims;
use crate::errors::{AppError, AuthFailure};

/// 인증된 요청의 주체
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subject {
    /// 저장소에 존재하는 계정
    Account(String),
    /// 저장소 레코드가 없는 센티널 관리자
    SuperAdmin,
}

/// 검증된 토큰에서 추출된 사용자 정보
///
/// 인증 미들웨어가 Request Extensions에 저장하며, 핸들러는 읽기만 합니다.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    subject: Subject,
    role: Role,
}

/// 선택적 인증 모드에서 인증에 실패한 사유
///
/// 보호된 핸들러가 추출을 시도할 때 이 사유로 거절합니다.
#[derive(Debug, Clone, Copy)]
pub struct AuthRejection(pub AuthFailure);

impl AuthenticatedUser {
    /// 검증된 클레임으로부터 생성
    ///
    /// 센티널 subject는 클레임의 역할과 무관하게 항상 관리자입니다.
    pub fn from_claims(claims: &Claims) -> Self {
        if claims.is_super_admin() {
            Self {
                subject: Subject::SuperAdmin,
                role: Role::Admin,
            }
        } else {
            Self {
                subject: Subject::Account(claims.subject().to_string()),
                role: claims.role(),
            }
        }
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// 계정 ID. 센티널 관리자는 `None`
    pub fn account_id(&self) -> Option<&str> {
        match &self.subject {
            Subject::Account(id) => Some(id),
            Subject::SuperAdmin => None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        RequiredRole::admin().is_satisfied(self.role)
    }

    pub fn is_super_admin(&self) -> bool {
        self.subject == Subject::SuperAdmin
    }

    /// 역할 요구사항 검사
    pub fn authorize(&self, required: &RequiredRole) -> Result<(), AppError> {
        if required.is_satisfied(self.role) {
            Ok(())
        } else {
            log::warn!("권한 부족: {:?} ({:?}), 필요 권한: {:?}", self.subject, self.role, required);
            Err(AppError::AuthorizationError("관리자 권한이 필요합니다.".to_string()))
        }
    }

    /// 본인 또는 관리자만 허용
    pub fn authorize_self_or_admin(&self, account_id: &str) -> Result<(), AppError> {
        if self.is_admin() || self.account_id() == Some(account_id) {
            Ok(())
        } else {
            Err(AppError::AuthorizationError("접근 권한이 부족합니다.".to_string()))
        }
    }

    fn from_extensions(req: &HttpRequest) -> Result<Self, AppError> {
        let extensions = req.extensions();
        if let Some(user) = extensions.get::<AuthenticatedUser>() {
            return Ok(user.clone());
        }

        let failure = extensions
            .get::<AuthRejection>()
            .map(|rejection| rejection.0)
            .unwrap_or(AuthFailure::MissingToken);
        Err(AppError::AuthenticationError(failure))
    }
}

/// ActixWeb FromRequest trait 구현
impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Self::from_extensions(req))
    }
}

/// 관리자 전용 핸들러용 추출자
///
/// 인증 정보가 없으면 401, 관리자가 아니면 403으로 거절합니다.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl FromRequest for AdminUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let result = AuthenticatedUser::from_extensions(req).and_then(|user| {
            user.authorize(&RequiredRole::admin())?;
            Ok(AdminUser(user))
        });
        ready(result)
    }
}
