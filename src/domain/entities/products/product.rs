use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// 상품 엔티티
///
/// 가격과 재고는 원 단위 정수이며 음수가 될 수 없습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub description: String,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Product {
    pub fn new(
        name: String,
        price: i64,
        description: String,
        stock: i64,
        image: Option<String>,
        category: Option<String>,
    ) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name,
            price,
            description,
            stock,
            image,
            category,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id_string(&self) -> Option<String> {
        self.id.as_ref().map(|id| id.to_hex())
    }

    pub fn is_in_stock(&self, quantity: i64) -> bool {
        quantity > 0 && self.stock >= quantity
    }
}

/// 상품 수정 내용. `None` 필드는 변경하지 않습니다.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub stock: Option<i64>,
    pub image: Option<String>,
    pub category: Option<String>,
}

impl ProductChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.stock.is_none()
            && self.image.is_none()
            && self.category.is_none()
    }

    /// 메모리 상의 상품에 변경 적용
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(image) = &self.image {
            product.image = Some(image.clone());
        }
        if let Some(category) = &self.category {
            product.category = Some(category.clone());
        }
        product.updated_at = DateTime::now();
    }
}
