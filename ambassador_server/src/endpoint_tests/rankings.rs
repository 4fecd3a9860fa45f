use actix_web::{http::StatusCode, test::TestRequest};
use amb_common::Cents;
use ambassador_engine::traits::RankingStore;
use serde_json::{json, Value};

use super::{
    helpers::{prepare_db, send, tear_down},
    mocks::unused_gateway,
};

#[actix_web::test]
async fn leaderboard() {
    let (db, _) = prepare_db().await;
    let (status, body) = send(TestRequest::get().uri("/api/rankings").to_request(), &db, unused_gateway()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "[]");

    db.increment_score("Alice Ambassador", Cents::from(9000)).await.unwrap();
    db.increment_score("Carol Closer", Cents::from(500)).await.unwrap();
    db.increment_score("Alice Ambassador", Cents::from(4500)).await.unwrap();

    let (status, body) = send(TestRequest::get().uri("/api/rankings").to_request(), &db, unused_gateway()).await;
    assert_eq!(status, StatusCode::OK);
    let board: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        board,
        json!([
            {"name": "Alice Ambassador", "score": 13500},
            {"name": "Carol Closer", "score": 500}
        ])
    );

    let (_, body) = send(TestRequest::get().uri("/api/rankings?limit=1").to_request(), &db, unused_gateway()).await;
    let board: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(board.as_array().unwrap().len(), 1);
    tear_down(db).await;
}
