use actix_web::{http::StatusCode, test::TestRequest};
use ambassador_engine::traits::{CheckoutGatewayError, OrderManagement};
use serde_json::{json, Value};

use super::{
    helpers::{prepare_db, send, tear_down},
    mocks::{gateway_returning, unused_gateway, MockGateway},
};

fn new_order(code: &str, product_id: i64, quantity: i64) -> Value {
    json!({
        "code": code,
        "first_name": "Bob",
        "last_name": "Builder",
        "email": "bob@example.com",
        "address": "1 Main St",
        "country": "US",
        "city": "Springfield",
        "zip": "12345",
        "products": [{"product_id": product_id, "quantity": quantity}]
    })
}

fn post(path: &str, body: Value) -> actix_http::Request {
    TestRequest::post().uri(path).set_json(body).to_request()
}

#[actix_web::test]
async fn create_and_list_orders() {
    let (db, mug) = prepare_db().await;
    let (status, body) = send(post("/api/orders", new_order("ABC123", mug, 2)), &db, gateway_returning("cs_test_a1")).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    let session: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(session["id"], "cs_test_a1");
    assert_eq!(session["url"], "https://checkout.stripe.com/c/pay/cs_test_a1");

    let (status, body) = send(TestRequest::get().uri("/api/orders").to_request(), &db, unused_gateway()).await;
    assert_eq!(status, StatusCode::OK);
    let orders: Value = serde_json::from_str(&body).unwrap();
    let orders = orders.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    let order = &orders[0];
    assert_eq!(order["name"], "Bob Builder");
    assert_eq!(order["total"], 10_000);
    assert_eq!(order["code"], "ABC123");
    assert_eq!(order["ambassador_email"], "alice@x.com");
    assert_eq!(order["payment_reference"], "cs_test_a1");
    assert_eq!(order["completed"], false);
    assert_eq!(order["order_items"][0]["quantity"], 2);
    assert_eq!(order["order_items"][0]["unit_price"], 5000);
    assert_eq!(order["order_items"][0]["platform_revenue"], 1000);
    assert_eq!(order["order_items"][0]["ambassador_revenue"], 9000);
    tear_down(db).await;
}

#[actix_web::test]
async fn invalid_link() {
    let (db, mug) = prepare_db().await;
    let (status, body) = send(post("/api/orders", new_order("NOPE", mug, 1)), &db, unused_gateway()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, r#"{"error":"Invalid link!"}"#);
    assert!(db.fetch_orders().await.unwrap().is_empty());
    tear_down(db).await;
}

#[actix_web::test]
async fn invalid_products() {
    let (db, mug) = prepare_db().await;
    let (status, _) = send(post("/api/orders", new_order("ABC123", mug + 1, 1)), &db, unused_gateway()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(post("/api/orders", new_order("ABC123", mug, 0)), &db, unused_gateway()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = send(post("/api/orders", json!({"code": "ABC123"})), &db, unused_gateway()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(db.fetch_orders().await.unwrap().is_empty());
    tear_down(db).await;
}

#[actix_web::test]
async fn gateway_failure_stores_nothing() {
    let (db, mug) = prepare_db().await;
    let mut gateway = MockGateway::new();
    gateway.expect_create_checkout_session().times(1).returning(|_, _| {
        Err(CheckoutGatewayError::Rejected { status: 400, message: "Invalid currency".into() })
    });
    let (status, body) = send(post("/api/orders", new_order("ABC123", mug, 1)), &db, gateway).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("Invalid currency"), "{body}");
    assert!(db.fetch_orders().await.unwrap().is_empty());
    tear_down(db).await;
}

#[actix_web::test]
async fn confirm_order() {
    let (db, mug) = prepare_db().await;
    let (status, _) = send(post("/api/orders", new_order("ABC123", mug, 2)), &db, gateway_returning("cs_test_b2")).await;
    assert_eq!(status, StatusCode::OK);

    for _ in 0..2 {
        let (status, body) =
            send(post("/api/orders/confirm", json!({"source": "cs_test_b2"})), &db, unused_gateway()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"message":"success"}"#);
    }
    let order = db.fetch_order_by_payment_reference("cs_test_b2").await.unwrap().unwrap();
    assert!(order.completed);
    tear_down(db).await;
}

#[actix_web::test]
async fn confirm_unknown_order() {
    let (db, _) = prepare_db().await;
    let (status, body) =
        send(post("/api/orders/confirm", json!({"source": "cs_nobody"})), &db, unused_gateway()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("cs_nobody"), "{body}");
    tear_down(db).await;
}
