//! # Data Transfer Objects (DTO) Module
//!
//! API 경계에서 주고받는 요청/응답 구조체입니다. 엔티티를 그대로 노출하지 않고,
//! 응답 DTO는 비밀번호 해시 같은 내부 필드를 포함하지 않습니다.
//!
//! ```text
//! dto/
//! ├── common.rs           # 공통 성공 응답
//! ├── users/              # 가입, 로그인, 프로필
//! ├── products/           # 상품 등록/수정
//! └── orders/             # 주문 생성, 상태 변경
//! ```
//!
//! 가입 요청은 필드 검증 규칙 테이블(`services::validation`)로, 나머지 요청은
//! `validator` derive로 검증합니다.

pub mod common;
pub mod orders;
pub mod products;
pub mod users;

pub use common::*;
pub use orders::*;
pub use products::*;
pub use users::*;
