//! 주문 서비스
//!
//! 주문 생성 시 재고를 먼저 원자적으로 차감하고, 주문 저장이 실패하면 차감한
//! 재고를 되돌립니다.

use std::sync::Arc;

use validator::Validate;

use crate::domain::dto::orders::CreateOrderRequest;
use crate::domain::entities::orders::{Order, OrderStatus};
use crate::domain::models::auth::AuthenticatedUser;
use crate::errors::{AppError, AppResult, FieldErrors};
use crate::repositories::orders::OrderStore;
use crate::repositories::products::ProductStore;
use crate::repositories::users::UserStore;

pub struct OrderService {
    orders: Arc<dyn OrderStore>,
    products: Arc<dyn ProductStore>,
    users: Arc<dyn UserStore>,
}

impl OrderService {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        products: Arc<dyn ProductStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self { orders, products, users }
    }

    /// 주문 생성
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 상품 또는 주문자 계정 없음
    /// * `AppError::ConflictError` - 재고 부족
    /// * `AppError::ValidationError` - 주문 금액이 `i64` 범위를 넘음
    pub async fn place_order(&self, user: &AuthenticatedUser, request: CreateOrderRequest) -> AppResult<Order> {
        request.validate().map_err(|e| AppError::ValidationError(FieldErrors::from(e)))?;

        // 센티널 관리자는 계정 레코드가 없으므로 주문할 수 없습니다
        let account_id = user
            .account_id()
            .ok_or_else(|| AppError::AuthorizationError("주문은 회원 계정으로만 가능합니다.".to_string()))?;
        let account = self
            .users
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| AppError::NotFound("사용자를 찾을 수 없습니다.".to_string()))?;

        let listed = self
            .products
            .find_by_id(&request.product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다.".to_string()))?;
        Self::total_amount(listed.price, request.quantity)?;

        let product = self
            .products
            .reserve_stock(&request.product_id, request.quantity)
            .await?
            .ok_or_else(|| AppError::ConflictError("재고가 부족합니다".to_string()))?;

        // 조회와 차감 사이에 가격이 바뀌었을 수 있으므로 차감된 상품 기준으로 다시 계산
        let total_amount = match Self::total_amount(product.price, request.quantity) {
            Ok(total) => total,
            Err(e) => {
                self.release_reserved(&request.product_id, request.quantity).await;
                return Err(e);
            }
        };

        let order = Order::new(
            account_id.to_string(),
            request.customer_name.unwrap_or(account.username),
            request.product_id.clone(),
            product.name.clone(),
            request.quantity,
            total_amount,
        );

        match self.orders.insert(order).await {
            Ok(order) => {
                log::info!("주문 접수: {} ({} x{})", order.order_number, order.product_name, order.quantity);
                Ok(order)
            }
            Err(e) => {
                self.release_reserved(&request.product_id, request.quantity).await;
                Err(e)
            }
        }
    }

    fn total_amount(unit_price: i64, quantity: i64) -> AppResult<i64> {
        Order::total_for(unit_price, quantity)
            .ok_or_else(|| AppError::validation("quantity", "주문 금액이 허용 범위를 초과했습니다"))
    }

    /// 차감한 재고 복구. 복구 실패는 기록만 하고 원래 에러를 돌려줍니다.
    async fn release_reserved(&self, product_id: &str, quantity: i64) {
        if let Err(e) = self.products.release_stock(product_id, quantity).await {
            log::error!("재고 복구 실패: product={} quantity={} ({})", product_id, quantity, e);
        }
    }

    /// 전체 주문, 최근 주문 순
    pub async fn list_orders(&self) -> AppResult<Vec<Order>> {
        self.orders.list_newest_first().await
    }

    /// 호출자의 주문 내역. 센티널 관리자는 빈 목록입니다.
    pub async fn list_for(&self, user: &AuthenticatedUser) -> AppResult<Vec<Order>> {
        match user.account_id() {
            Some(account_id) => self.orders.list_by_account(account_id).await,
            None => Ok(Vec::new()),
        }
    }

    /// 주문 상태 변경
    ///
    /// 배송완료 또는 취소된 주문은 변경할 수 없습니다. 취소 시 재고를 되돌립니다.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> AppResult<Order> {
        let current = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("주문을 찾을 수 없습니다.".to_string()))?;

        if current.status == status {
            return Ok(current);
        }
        if current.status.is_final() {
            return Err(AppError::ConflictError(format!(
                "{} 상태의 주문은 변경할 수 없습니다",
                current.status.as_str()
            )));
        }

        // 조회 이후 다른 요청이 먼저 종료 상태로 바꿨다면 변경되지 않습니다
        let Some(updated) = self.orders.transition_status(id, status).await? else {
            return Err(AppError::ConflictError("이미 처리가 끝난 주문입니다".to_string()));
        };

        if status == OrderStatus::Cancelled {
            self.products.release_stock(&updated.product_id, updated.quantity).await?;
        }

        log::info!("주문 상태 변경: {} {} → {}", updated.order_number, current.status.as_str(), status.as_str());
        Ok(updated)
    }
}
