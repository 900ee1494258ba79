use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::domain::entities::orders::{Order, OrderStatus};
use crate::errors::{AppError, AppResult};
use crate::repositories::orders::OrderStore;
use crate::repositories::parse_object_id;

/// 메모리 주문 저장소
#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: Mutex<Vec<Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Vec<Order>>> {
        self.orders
            .lock()
            .map_err(|_| AppError::InternalError("주문 저장소 잠금 실패".to_string()))
    }

    fn newest_first(mut orders: Vec<Order>) -> Vec<Order> {
        orders.sort_by(|a, b| b.order_date.cmp(&a.order_date));
        orders
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderRepository {
    async fn insert(&self, mut order: Order) -> AppResult<Order> {
        let mut orders = self.lock()?;
        if orders.iter().any(|o| o.order_number == order.order_number) {
            return Err(AppError::duplicate("order_number", "이미 존재하는 주문 번호입니다"));
        }
        order.id = Some(ObjectId::new());
        orders.push(order.clone());
        Ok(order)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Order>> {
        let object_id = parse_object_id(id)?;
        Ok(self.lock()?.iter().find(|o| o.id == Some(object_id)).cloned())
    }

    async fn list_newest_first(&self) -> AppResult<Vec<Order>> {
        Ok(Self::newest_first(self.lock()?.clone()))
    }

    async fn list_by_account(&self, account_id: &str) -> AppResult<Vec<Order>> {
        let orders = self
            .lock()?
            .iter()
            .filter(|o| o.account_id == account_id)
            .cloned()
            .collect();
        Ok(Self::newest_first(orders))
    }

    async fn transition_status(&self, id: &str, status: OrderStatus) -> AppResult<Option<Order>> {
        let object_id = parse_object_id(id)?;
        Ok(self
            .lock()?
            .iter_mut()
            .find(|o| o.id == Some(object_id) && !o.status.is_final())
            .map(|order| {
                order.status = status;
                order.clone()
            }))
    }
}
