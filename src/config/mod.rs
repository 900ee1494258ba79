//! 애플리케이션 설정
//!
//! 환경 변수 기반 설정을 인증 관련(`auth_config`)과 서버/데이터 관련(`data_config`)으로 나눕니다.

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
