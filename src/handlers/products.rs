//! 상품 카탈로그 핸들러
//!
//! 스코프에는 `AuthMiddleware::optional()`이 걸려 있어 조회는 누구나 할 수 있고,
//! 등록/수정/삭제는 [`AdminUser`] 추출자가 관리자만 통과시킵니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use crate::domain::dto::products::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::domain::dto::{ApiResponse, MessageResponse};
use crate::domain::models::auth::AdminUser;
use crate::errors::AppError;
use crate::services::products::ProductService;

/// 상품 목록 (최신 등록순)
#[get("")]
pub async fn list_products(
    product_service: web::Data<ProductService>,
) -> Result<HttpResponse, AppError> {
    let products: Vec<ProductResponse> = product_service
        .list_products()
        .await?
        .into_iter()
        .map(ProductResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::ok(products)))
}

#[get("/{product_id}")]
pub async fn get_product(
    product_service: web::Data<ProductService>,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product = product_service.get_product(&product_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProductResponse::from(product))))
}

/// 상품 등록 (관리자)
#[post("")]
pub async fn create_product(
    product_service: web::Data<ProductService>,
    _admin: AdminUser,
    payload: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = product_service.create_product(payload.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        ProductResponse::from(product),
        "상품이 등록되었습니다.",
    )))
}

/// 상품 수정 (관리자). 보낸 필드만 변경합니다.
#[put("/{product_id}")]
pub async fn update_product(
    product_service: web::Data<ProductService>,
    _admin: AdminUser,
    product_id: web::Path<String>,
    payload: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = product_service.update_product(&product_id, payload.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        ProductResponse::from(product),
        "상품이 수정되었습니다.",
    )))
}

/// 상품 삭제 (관리자)
#[delete("/{product_id}")]
pub async fn delete_product(
    product_service: web::Data<ProductService>,
    _admin: AdminUser,
    product_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    product_service.delete_product(&product_id).await?;

    Ok(HttpResponse::Ok().json(MessageResponse::new("상품이 삭제되었습니다.")))
}
