//! 공통 유틸리티 함수 모듈
//!
//! - [`string_utils`] - 요청 문자열 정리, 선택 필드 역직렬화

pub mod string_utils;
