//! 계정 관리 서비스 모듈
//!
//! 가입, 로그인 자격 증명 확인, 프로필/비밀번호 변경, 삭제, 소셜 계정 연결을
//! 담당하는 [`UserService`]를 제공합니다.

pub mod user_service;

pub use user_service::UserService;
