//! 상품 저장소 계약과 MongoDB 구현

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, DateTime};
use mongodb::options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument};
use mongodb::{Collection, IndexModel};

use crate::db::Database;
use crate::domain::entities::products::{Product, ProductChanges};
use crate::errors::{AppError, AppResult};
use crate::repositories::parse_object_id;

const COLLECTION_NAME: &str = "products";

/// 상품 저장소
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn init(&self) -> AppResult<()> {
        Ok(())
    }

    async fn insert(&self, product: Product) -> AppResult<Product>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>>;

    async fn list_newest_first(&self) -> AppResult<Vec<Product>>;

    async fn update(&self, id: &str, changes: &ProductChanges) -> AppResult<Option<Product>>;

    async fn delete(&self, id: &str) -> AppResult<bool>;

    /// 재고가 충분할 때만 원자적으로 차감하고 차감 후 상품을 반환
    ///
    /// 상품이 없거나 재고가 부족하면 `None`
    async fn reserve_stock(&self, id: &str, quantity: i64) -> AppResult<Option<Product>>;

    /// 차감했던 재고 복구
    async fn release_stock(&self, id: &str, quantity: i64) -> AppResult<bool>;
}

pub struct MongoProductRepository {
    db: Arc<Database>,
}

impl MongoProductRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Product> {
        self.db.collection::<Product>(COLLECTION_NAME)
    }
}

#[async_trait]
impl ProductStore for MongoProductRepository {
    async fn init(&self) -> AppResult<()> {
        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_index(created_at_index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(())
    }

    async fn insert(&self, mut product: Product) -> AppResult<Product> {
        let result = self.collection()
            .insert_one(&product)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        product.id = result.inserted_id.as_object_id();
        Ok(product)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Product>> {
        let object_id = parse_object_id(id)?;
        self.collection()
            .find_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn list_newest_first(&self) -> AppResult<Vec<Product>> {
        let cursor = self.collection()
            .find(doc! {})
            .sort(doc! { "created_at": -1 })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn update(&self, id: &str, changes: &ProductChanges) -> AppResult<Option<Product>> {
        let object_id = parse_object_id(id)?;

        let mut set = doc! { "updated_at": DateTime::now() };
        if let Some(name) = &changes.name {
            set.insert("name", name.as_str());
        }
        if let Some(price) = changes.price {
            set.insert("price", price);
        }
        if let Some(description) = &changes.description {
            set.insert("description", description.as_str());
        }
        if let Some(stock) = changes.stock {
            set.insert("stock", stock);
        }
        if let Some(image) = &changes.image {
            set.insert("image", image.as_str());
        }
        if let Some(category) = &changes.category {
            set.insert("category", category.as_str());
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set })
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;
        let result = self.collection()
            .delete_one(doc! { "_id": object_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(result.deleted_count > 0)
    }

    async fn reserve_stock(&self, id: &str, quantity: i64) -> AppResult<Option<Product>> {
        let object_id = parse_object_id(id)?;
        let decrement = -quantity;
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": object_id, "stock": { "$gte": quantity } },
                doc! { "$inc": { "stock": decrement }, "$set": { "updated_at": DateTime::now() } },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn release_stock(&self, id: &str, quantity: i64) -> AppResult<bool> {
        let object_id = parse_object_id(id)?;
        let result = self.collection()
            .update_one(doc! { "_id": object_id }, doc! { "$inc": { "stock": quantity } })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;
        Ok(result.matched_count > 0)
    }
}
