//! 상품 등록/수정 요청

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::products::{Product, ProductChanges};
use crate::utils::string_utils::deserialize_optional_string;

/// 상품 등록 요청
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 100, message = "상품명은 1-100자 사이여야 합니다"))]
    pub name: String,

    #[validate(range(min = 0, max = 1000000000, message = "가격은 0원 이상 10억원 이하여야 합니다"))]
    pub price: i64,

    #[serde(default)]
    #[validate(length(max = 2000, message = "상품 설명은 2000자 이하여야 합니다"))]
    pub description: String,

    #[serde(default)]
    #[validate(range(min = 0, message = "재고는 0 이상이어야 합니다"))]
    pub stock: i64,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "유효한 이미지 URL을 입력해주세요"))]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
}

impl CreateProductRequest {
    pub fn into_product(self) -> Product {
        Product::new(
            self.name.trim().to_string(),
            self.price,
            self.description,
            self.stock,
            self.image,
            self.category,
        )
    }
}

/// 상품 수정 요청. 전달된 필드만 변경합니다.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100, message = "상품명은 1-100자 사이여야 합니다"))]
    pub name: Option<String>,

    #[validate(range(min = 0, max = 1000000000, message = "가격은 0원 이상 10억원 이하여야 합니다"))]
    pub price: Option<i64>,

    #[validate(length(max = 2000, message = "상품 설명은 2000자 이하여야 합니다"))]
    pub description: Option<String>,

    #[validate(range(min = 0, message = "재고는 0 이상이어야 합니다"))]
    pub stock: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "유효한 이미지 URL을 입력해주세요"))]
    pub image: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub category: Option<String>,
}

impl UpdateProductRequest {
    pub fn into_changes(self) -> ProductChanges {
        ProductChanges {
            name: self.name.map(|name| name.trim().to_string()),
            price: self.price,
            description: self.description,
            stock: self.stock,
            image: self.image,
            category: self.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FieldErrors;

    #[test]
    fn test_create_product_validation_messages() {
        let request: CreateProductRequest = serde_json::from_str(
            r#"{"name": "", "price": -1, "stock": -5, "image": "not a url"}"#,
        ).unwrap();

        let errors = FieldErrors::from(request.validate().unwrap_err());
        assert_eq!(errors.get("price"), Some("가격은 0원 이상 10억원 이하여야 합니다"));
        assert_eq!(errors.get("stock"), Some("재고는 0 이상이어야 합니다"));
        assert!(errors.contains("name"));
        assert!(errors.contains("image"));
    }

    #[test]
    fn test_valid_product_request() {
        let request: CreateProductRequest = serde_json::from_str(
            r#"{"name": "무선 키보드", "price": 39000, "stock": 10, "image": "https://cdn.example.com/kb.png"}"#,
        ).unwrap();

        assert!(request.validate().is_ok());
        let product = request.into_product();
        assert_eq!(product.price, 39000);
        assert_eq!(product.category, None);
    }

    #[test]
    fn test_price_upper_bound() {
        let request: CreateProductRequest = serde_json::from_str(
            r#"{"name": "무선 키보드", "price": 5000000000000000000}"#,
        ).unwrap();
        assert!(FieldErrors::from(request.validate().unwrap_err()).contains("price"));

        let request: UpdateProductRequest = serde_json::from_str(r#"{"price": 1000000001}"#).unwrap();
        assert!(request.validate().is_err());

        let request: UpdateProductRequest = serde_json::from_str(r#"{"price": 1000000000}"#).unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_update_request_only_validates_present_fields() {
        let request: UpdateProductRequest = serde_json::from_str(r#"{"stock": 3}"#).unwrap();
        assert!(request.validate().is_ok());

        let changes = request.into_changes();
        assert_eq!(changes.stock, Some(3));
        assert!(changes.name.is_none());
    }
}
