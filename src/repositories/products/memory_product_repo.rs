use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::domain::entities::products::{Product, ProductChanges};
use crate::errors::{AppError, AppResult};
use crate::repositories::parse_object_id;
use crate::repositories::products::ProductStore;

/// 메모리 상품 저장소
#[derive(Default)]
pub struct InMemoryProductRepository {
    products: Mutex<Vec<Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, Vec<Product>>> {
        self.products
            .lock()
            .map_err(|_| AppError::InternalError("상품 저장소 잠금 실패".to_string()))
    }
}

#[async_trait]
impl ProductStore for InMemoryProductRepository {
    async fn insert(&self, mut product: Product) -> AppResult<Product> {
        product.id = Some(ObjectId::new());
        self.lock()?.push(product.clone());
        Ok(product)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>> {
        let object_id = parse_object_id(id)?;
        Ok(self.lock()?.iter().find(|p| p.id == Some(object_id)).cloned())
    }

    async fn list_newest_first(&self) -> AppResult<Vec<Product>> {
        let mut products = self.lock()?.clone();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(products)
    }

    async fn update(&self, id: &str, changes: &ProductChanges) -> AppResult<Option<Product>> {
        let object_id = parse_object_id(id)?;
        Ok(self
            .lock()?
            .iter_mut()
            .find(|p| p.id == Some(object_id))
            .map(|product| {
                changes.apply_to(product);
                product.clone()
            }))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;
        let mut products = self.lock()?;
        let before = products.len();
        products.retain(|p| p.id != Some(object_id));
        Ok(products.len() < before)
    }

    async fn reserve_stock(&self, id: &str, quantity: i64) -> AppResult<Option<Product>> {
        let object_id = parse_object_id(id)?;
        let mut products = self.lock()?;
        Ok(products
            .iter_mut()
            .find(|p| p.id == Some(object_id) && p.stock >= quantity)
            .map(|product| {
                product.stock -= quantity;
                product.updated_at = DateTime::now();
                product.clone()
            }))
    }

    async fn release_stock(&self, id: &str, quantity: i64) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;
        let mut products = self.lock()?;
        match products.iter_mut().find(|p| p.id == Some(object_id)) {
            Some(product) => {
                product.stock += quantity;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
