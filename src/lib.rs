//! 스토어프론트 백엔드
//!
//! 상품 카탈로그, 회원 가입/로그인(소셜 로그인 포함), 주문, 관리자 기능을 제공하는
//! REST API 서버입니다.
//!
//! # Features
//!
//! - **회원 관리**: 필드 단위 검증, 아이디 중복 확인, 프로필/비밀번호 변경
//! - **토큰 인증**: HS256 서명 토큰, 역할 기반 접근 제어
//! - **소셜 로그인**: Google, Naver, Kakao OAuth 2.0
//! - **카탈로그/주문**: 상품 관리, 재고 차감 주문
//! - **MongoDB**: 유니크 인덱스로 아이디/이메일 중복 최종 판정
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직, 검증, 토큰
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 저장소 trait (MongoDB / 메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use storefront_backend::state::{AppServices, AuthSettings};
//! use storefront_backend::routes::configure_all_routes;
//!
//! let services = AppServices::in_memory(AuthSettings::from_env()?)?;
//! let app = App::new()
//!     .configure(|cfg| services.register(cfg))
//!     .configure(configure_all_routes);
//! ```

pub mod config;
pub mod db;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod state;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod errors;
pub mod middlewares;
