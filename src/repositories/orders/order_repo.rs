//! 주문 저장소 계약과 MongoDB 구현

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::orders::{Order, OrderStatus};
use crate::errors::{AppError, AppResult};
use crate::repositories::{duplicate_key_message, parse_object_id};

const COLLECTION_NAME: &str = "orders";

/// 주문 저장소
///
/// 주문 번호는 유일해야 하며 충돌 시 `DuplicateError`를 반환합니다.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn init(&self) -> AppResult<()> {
        Ok(())
    }

    async fn insert(&self, order: Order) -> AppResult<Order>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Order>>;

    /// 전체 주문, 최근 주문 순
    async fn list_newest_first(&self) -> AppResult<Vec<Order>>;

    /// 계정별 주문, 최근 주문 순
    async fn list_by_account(&self, account_id: &str) -> AppResult<Vec<Order>>;

    /// 아직 종료되지 않은(배송완료/취소가 아닌) 주문의 상태만 바꿉니다.
    ///
    /// 주문이 없거나 이미 종료 상태면 `None`. 확인과 변경은 한 번의 연산으로 이뤄지므로
    /// 동시에 들어온 취소 요청 중 하나만 성공합니다.
    async fn transition_status(&self, id: &str, status: OrderStatus) -> AppResult<Option<Order>>;
}

/// 종료 상태 주문을 제외하는 필터
fn open_order_filter(object_id: ObjectId) -> Document {
    let final_statuses: Vec<&str> = OrderStatus::FINAL.iter().map(OrderStatus::as_str).collect();
    doc! { "_id": object_id, "status": { "$nin": final_statuses } }
}

pub struct MongoOrderRepository {
    db: Arc<Database>,
}

impl MongoOrderRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Order> {
        self.db.collection::<Order>(COLLECTION_NAME)
    }

    async fn find_sorted(&self, filter: Document) -> AppResult<Vec<Order>> {
        let cursor = self.collection()
            .find(filter)
            .sort(doc! { "order_date": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl OrderStore for MongoOrderRepository {
    async fn init(&self) -> AppResult<()> {
        let order_number_index = IndexModel::builder()
            .keys(doc! { "order_number": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("order_number_unique".to_string())
                .build())
            .build();

        let account_index = IndexModel::builder()
            .keys(doc! { "account_id": 1, "order_date": -1 })
            .options(IndexOptions::builder()
                .name("account_order_date".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([order_number_index, account_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn insert(&self, mut order: Order) -> AppResult<Order> {
        let result = self.collection()
            .insert_one(&order)
            .await
            .map_err(|e| match duplicate_key_message(&e) {
                Some(_) => AppError::duplicate("order_number", "이미 존재하는 주문 번호입니다"),
                None => AppError::DatabaseError(e.to_string()),
            })?;

        order.id = result.inserted_id.as_object_id();
        Ok(order)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Order>> {
        let object_id = parse_object_id(id)?;
        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn list_newest_first(&self) -> AppResult<Vec<Order>> {
        self.find_sorted(doc! {}).await
    }

    async fn list_by_account(&self, account_id: &str) -> AppResult<Vec<Order>> {
        self.find_sorted(doc! { "account_id": account_id }).await
    }

    async fn transition_status(&self, id: &str, status: OrderStatus) -> AppResult<Option<Order>> {
        let object_id = parse_object_id(id)?;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(open_order_filter(object_id), doc! { "$set": { "status": status.as_str() } })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
