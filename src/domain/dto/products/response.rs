use serde::Serialize;

use crate::domain::entities::products::Product;

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub description: String,
    pub stock: i64,
    pub image: Option<String>,
    pub category: Option<String>,
    pub created_at: Option<String>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id_string().unwrap_or_default(),
            created_at: product.created_at.try_to_rfc3339_string().ok(),
            name: product.name,
            price: product.price,
            description: product.description,
            stock: product.stock,
            image: product.image,
            category: product.category,
        }
    }
}
