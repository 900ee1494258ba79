//! # Domain Layer Module
//!
//! 스토어프론트의 도메인 계층입니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - MongoDB에 저장되는 계정, 상품, 주문
//! ├── DTOs      - API 요청/응답 계약
//! └── Models    - 역할, 토큰 클레임, 소셜 로그인 프로필
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB)
//! ```

pub mod entities;
pub mod dto;
pub mod models;
