//! # Repository Layer
//!
//! 저장소 접근 계층입니다. 각 도메인은 `async_trait` 기반 저장소 trait을 정의하고,
//! MongoDB 구현과 테스트/로컬 실행용 메모리 구현을 함께 제공합니다.
//!
//! 유일성 제약(아이디, 이메일, 주문 번호)은 두 구현 모두 저장 시점에 원자적으로
//! 검사하며, 위반 시 `AppError::DuplicateError`를 반환합니다.

use mongodb::bson::oid::ObjectId;
use mongodb::error::{ErrorKind, WriteFailure};

use crate::errors::AppError;

pub mod orders;
pub mod products;
pub mod users;

/// MongoDB 중복 키 에러 코드
const DUPLICATE_KEY_CODE: i32 = 11000;

/// 문자열 ID를 ObjectId로 변환
pub(crate) fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id).map_err(|_| AppError::validation("id", "유효하지 않은 ID 형식입니다"))
}

/// 중복 키 에러라면 서버 메시지(위반한 인덱스 이름 포함)를 반환
pub(crate) fn duplicate_key_message(err: &mongodb::error::Error) -> Option<&str> {
    match err.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE =>
        {
            Some(write_error.message.as_str())
        }
        ErrorKind::Command(command_error) if command_error.code == DUPLICATE_KEY_CODE => {
            Some(command_error.message.as_str())
        }
        _ => None,
    }
}
