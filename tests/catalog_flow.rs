mod common;

use actix_web::test;
use serde_json::{json, Value};

use common::{admin_token, bearer, init_app, services, signup};

fn product_body(stock: i64) -> Value {
    json!({
        "name": "무선 키보드",
        "price": 45000,
        "description": "저소음 키보드",
        "stock": stock,
        "category": "전자기기"
    })
}

#[actix_web::test]
async fn catalog_is_public_but_mutations_are_admin_only() {
    let services = services();
    let app = init_app(&services).await;
    let (user_token, _) = signup(&app, "shopper_10").await;
    let admin = admin_token(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .set_json(product_body(5))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&user_token))
        .set_json(product_body(5))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&admin))
        .set_json(product_body(5))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: Value = test::read_body_json(resp).await;
    let product_id = created["data"]["id"].as_str().unwrap().to_string();

    // 잘못된 토큰이라도 공개 조회는 통과
    let req = test::TestRequest::get()
        .uri("/api/products")
        .insert_header(bearer("garbage"))
        .to_request();
    let list: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(list["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", product_id))
        .to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["data"]["name"], "무선 키보드");

    let req = test::TestRequest::put()
        .uri(&format!("/api/products/{}", product_id))
        .insert_header(bearer(&admin))
        .set_json(json!({ "price": 39000 }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["data"]["price"], 39000);
    assert_eq!(updated["data"]["stock"], 5);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/products/{}", product_id))
        .insert_header(bearer(&admin))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", product_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn invalid_product_is_rejected_with_field_messages() {
    let services = services();
    let app = init_app(&services).await;
    let admin = admin_token(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "", "price": -1, "stock": -3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["name"].is_string());
    assert!(body["fields"]["price"].is_string());
    assert!(body["fields"]["stock"].is_string());

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&admin))
        .set_json(json!({ "name": "황금 키보드", "price": 5_000_000_000_000_000_000i64, "stock": 3 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["fields"]["price"].is_string());
}

#[actix_web::test]
async fn placing_orders_reserves_stock() {
    let services = services();
    let app = init_app(&services).await;
    let (user_token, user_id) = signup(&app, "shopper_11").await;
    let admin = admin_token(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&admin))
        .set_json(product_body(3))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let product_id = created["data"]["id"].as_str().unwrap().to_string();

    let order = |quantity: i64| {
        test::TestRequest::post()
            .uri("/api/orders")
            .insert_header(bearer(&user_token))
            .set_json(json!({ "product_id": product_id, "quantity": quantity }))
            .to_request()
    };

    let resp = test::call_service(&app, order(2)).await;
    assert_eq!(resp.status(), 201);
    let placed: Value = test::read_body_json(resp).await;
    assert_eq!(placed["data"]["total_amount"], 90000);
    assert_eq!(placed["data"]["status"], "주문접수");
    assert_eq!(placed["data"]["account_id"], user_id.as_str());
    assert!(placed["data"]["order_number"].as_str().unwrap().starts_with("ORD-"));

    let resp = test::call_service(&app, order(2)).await;
    assert_eq!(resp.status(), 409);

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", product_id))
        .to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["data"]["stock"], 1);

    let req = test::TestRequest::get()
        .uri("/api/users/me/orders")
        .insert_header(bearer(&user_token))
        .to_request();
    let mine: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn order_management_is_admin_only_and_cancel_restores_stock() {
    let services = services();
    let app = init_app(&services).await;
    let (user_token, _) = signup(&app, "shopper_12").await;
    let admin = admin_token(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&admin))
        .set_json(product_body(4))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let product_id = created["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/orders")
        .insert_header(bearer(&user_token))
        .set_json(json!({ "product_id": product_id, "quantity": 3 }))
        .to_request();
    let placed: Value = test::call_and_read_body_json(&app, req).await;
    let order_id = placed["data"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/orders")
        .insert_header(bearer(&user_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    let req = test::TestRequest::get()
        .uri("/api/orders")
        .insert_header(bearer(&admin))
        .to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all["data"].as_array().unwrap().len(), 1);

    let status = |value: &str| {
        test::TestRequest::put()
            .uri(&format!("/api/orders/{}/status", order_id))
            .insert_header(bearer(&admin))
            .set_json(json!({ "status": value }))
            .to_request()
    };

    let req = test::TestRequest::put()
        .uri(&format!("/api/orders/{}/status", order_id))
        .insert_header(bearer(&user_token))
        .set_json(json!({ "status": "취소" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    let cancelled: Value = test::call_and_read_body_json(&app, status("취소")).await;
    assert_eq!(cancelled["data"]["status"], "취소");

    let req = test::TestRequest::get()
        .uri(&format!("/api/products/{}", product_id))
        .to_request();
    let detail: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(detail["data"]["stock"], 4);

    // 취소된 주문은 더 이상 변경할 수 없음
    assert_eq!(test::call_service(&app, status("배송중")).await.status(), 409);
}

#[actix_web::test]
async fn sentinel_admin_cannot_place_orders() {
    let services = services();
    let app = init_app(&services).await;
    let admin = admin_token(&app).await;

    let req = test::TestRequest::post()
        .uri("/api/products")
        .insert_header(bearer(&admin))
        .set_json(product_body(1))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/orders")
        .insert_header(bearer(&admin))
        .set_json(json!({ "product_id": created["data"]["id"], "quantity": 1 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 403);

    let req = test::TestRequest::post()
        .uri("/api/orders")
        .set_json(json!({ "product_id": created["data"]["id"], "quantity": 1 }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);
}
