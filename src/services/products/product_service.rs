//! 상품 카탈로그 서비스

use std::sync::Arc;

use validator::Validate;

use crate::domain::dto::products::{CreateProductRequest, UpdateProductRequest};
use crate::domain::entities::products::Product;
use crate::errors::{AppError, AppResult, FieldErrors};
use crate::repositories::products::ProductStore;

pub struct ProductService {
    store: Arc<dyn ProductStore>,
}

impl ProductService {
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self { store }
    }

    pub async fn list_products(&self) -> AppResult<Vec<Product>> {
        self.store.list_newest_first().await
    }

    pub async fn get_product(&self, id: &str) -> AppResult<Product> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다.".to_string()))
    }

    pub async fn create_product(&self, request: CreateProductRequest) -> AppResult<Product> {
        request.validate().map_err(|e| AppError::ValidationError(FieldErrors::from(e)))?;

        let product = self.store.insert(request.into_product()).await?;
        log::info!("상품 등록: {} ({})", product.name, product.id_string().unwrap_or_default());
        Ok(product)
    }

    pub async fn update_product(&self, id: &str, request: UpdateProductRequest) -> AppResult<Product> {
        request.validate().map_err(|e| AppError::ValidationError(FieldErrors::from(e)))?;

        let changes = request.into_changes();
        if changes.is_empty() {
            return self.get_product(id).await;
        }

        self.store
            .update(id, &changes)
            .await?
            .ok_or_else(|| AppError::NotFound("상품을 찾을 수 없습니다.".to_string()))
    }

    pub async fn delete_product(&self, id: &str) -> AppResult<()> {
        if !self.store.delete(id).await? {
            return Err(AppError::NotFound("상품을 찾을 수 없습니다.".to_string()));
        }

        log::info!("상품 삭제: {}", id);
        Ok(())
    }
}
