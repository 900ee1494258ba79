//! # Domain Entities
//!
//! MongoDB 컬렉션에 저장되는 엔티티입니다.
//!
//! | 엔티티 | 컬렉션 | 설명 |
//! |--------|--------|------|
//! | [`users::Account`] | `accounts` | 로컬/소셜 로그인 계정 |
//! | [`products::Product`] | `products` | 판매 상품 |
//! | [`orders::Order`] | `orders` | 주문 내역 |
//!
//! 모든 엔티티는 `_id`를 `Option<ObjectId>`로 두고, 저장 시 저장소가 할당합니다.

pub mod orders;
pub mod products;
pub mod users;
