//! 인증 미들웨어 팩토리
//!
//! 스코프에 `.wrap(AuthMiddleware::required())` 형태로 등록합니다. 실제 요청 처리는
//! [`AuthMiddlewareService`]가 담당합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};
use crate::domain::models::auth::{AuthMode, RequiredRole, Role};
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    mode: AuthMode,
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    /// 인증 필수 + 역할 요구
    ///
    /// 역할 요구는 강제 모드에서만 의미가 있습니다.
    pub fn new_with_role(required_role: RequiredRole) -> Self {
        Self {
            mode: AuthMode::Required,
            required_role: Some(required_role),
        }
    }

    /// 토큰이 없거나 유효하지 않으면 401
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 토큰이 없어도 통과. 유효한 토큰이면 사용자 정보를 저장하고,
    /// 유효하지 않으면 실패 사유만 저장합니다.
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    pub fn required_with_role(role: Role) -> Self {
        Self::new_with_role(RequiredRole::Single(role))
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}
