//! 통합 테스트 공통 도구
//!
//! 메모리 저장소 위에 실제 라우터를 올려 HTTP 수준에서 검증합니다.

#![allow(dead_code)]

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, App, Error};
use actix_http::Request;
use serde_json::{json, Value};
use storefront_backend::config::{AdminConfig, JwtConfig};
use storefront_backend::routes::configure_all_routes;
use storefront_backend::state::{AppServices, AuthSettings};

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-pass!";

pub fn services() -> AppServices {
    let settings = AuthSettings::new(
        JwtConfig::new("integration-test-secret"),
        Some(AdminConfig::new(ADMIN_USERNAME, ADMIN_PASSWORD)),
    );
    AppServices::in_memory(settings).unwrap()
}

pub async fn init_app(
    services: &AppServices,
) -> impl Service<Request, Response = ServiceResponse, Error = Error> {
    let services = services.clone();
    test::init_service(
        App::new()
            .configure(move |cfg| services.register(cfg))
            .configure(configure_all_routes),
    )
    .await
}

pub fn signup_body(username: &str) -> Value {
    json!({
        "username": username,
        "email": format!("{}@example.com", username),
        "password": "Secret123!",
        "phone": "010-1234-5678",
        "address": "서울특별시 강남구 테헤란로 123"
    })
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// 가입 후 발급된 토큰과 계정 ID
pub async fn signup<S>(app: &S, username: &str) -> (String, String)
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(signup_body(username))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;

    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

pub async fn admin_token<S>(app: &S) -> String
where
    S: Service<Request, Response = ServiceResponse, Error = Error>,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/admin-login")
        .set_json(json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
        .to_request();
    let body: Value = test::call_and_read_body_json(app, req).await;

    body["token"].as_str().unwrap().to_string()
}
