//! 인증 미들웨어의 요청 처리부

use std::rc::Rc;
use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse};
use actix_web::{web, Error, HttpMessage, ResponseError};
use futures_util::future::LocalBoxFuture;
use crate::domain::models::auth::{AuthMode, AuthRejection, AuthenticatedUser, RequiredRole};
use crate::errors::{AppError, AuthFailure};
use crate::services::auth::TokenService;

pub struct AuthMiddlewareService<S> {
    pub service: Rc<S>,
    pub mode: AuthMode,
    pub required_role: Option<RequiredRole>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, actix_web::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let mode = self.mode.clone();
        let required_role = self.required_role.clone();

        Box::pin(async move {
            let Some(token_service) = req.app_data::<web::Data<TokenService>>().cloned() else {
                log::error!("TokenService가 App에 등록되어 있지 않습니다");
                let error = AppError::InternalError("token service not configured".to_string());
                return Ok(reject(req, error));
            };

            let header = req
                .headers()
                .get(actix_web::http::header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok());
            let auth_result = authenticate(header, &token_service);

            match (&mode, auth_result) {
                (AuthMode::Required, Err(failure)) => {
                    if failure.is_expired() {
                        log::warn!("인증 실패 (만료된 토큰): {} {}", req.method(), req.path());
                    } else {
                        log::warn!("인증 실패 ({}): {} {}", failure, req.method(), req.path());
                    }
                    return Ok(reject(req, AppError::AuthenticationError(failure)));
                }
                (AuthMode::Required, Ok(user)) => {
                    if let Some(ref required) = required_role {
                        if let Err(error) = user.authorize(required) {
                            return Ok(reject(req, error));
                        }
                    }

                    log::debug!("인증 성공: {:?}", user.subject());
                    req.extensions_mut().insert(user);
                }
                (AuthMode::Optional, Ok(user)) => {
                    log::debug!("선택적 인증 성공: {:?}", user.subject());
                    req.extensions_mut().insert(user);
                }
                // 토큰이 없으면 그대로 진행
                (AuthMode::Optional, Err(AuthFailure::MissingToken)) => {}
                (AuthMode::Optional, Err(failure)) => {
                    log::debug!("선택적 인증: 유효하지 않은 토큰 ({}), 요청 진행", failure);
                    req.extensions_mut().insert(AuthRejection(failure));
                }
            }

            // 다음 서비스로 요청 전달
            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}

fn reject<B>(req: ServiceRequest, error: AppError) -> ServiceResponse<EitherBody<B>> {
    let response = error.error_response();
    let (req, _) = req.into_parts();
    ServiceResponse::new(req, response).map_into_right_body()
}

/// `Authorization` 헤더 값으로 요청 주체 확인
///
/// 헤더 없음, Bearer 형식 아님, 토큰 검증 실패를 각각 다른 [`AuthFailure`]로 구분합니다.
pub fn authenticate(header: Option<&str>, tokens: &TokenService) -> Result<AuthenticatedUser, AuthFailure> {
    let header = header.ok_or(AuthFailure::MissingToken)?;
    let token = TokenService::extract_bearer_token(header)?;
    let claims = tokens.verify(token)?;

    Ok(AuthenticatedUser::from_claims(&claims))
}
