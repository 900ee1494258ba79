//! # Domain Models
//!
//! 저장소에 영속되지 않는 도메인 모델을 정의합니다.
//!
//! - [`auth`]: 역할, 인증된 사용자, 인증 모드
//! - [`token`]: 서명 토큰 클레임과 발급 결과
//! - [`oauth`]: 소셜 로그인 프로바이더 응답 모델

pub mod auth;
pub mod oauth;
pub mod token;
