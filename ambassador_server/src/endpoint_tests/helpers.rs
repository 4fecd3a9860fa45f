use actix_web::{body::MessageBody, http::StatusCode, test, web, App};
use amb_common::Cents;
use ambassador_engine::{
    db_types::{NewProduct, NewUser},
    events::EventProducers,
    sqlite_db::{links, products, users},
    traits::AmbassadorDatabase,
    OrderFlowApi,
    RankingsApi,
    SqliteDatabase,
};
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

use super::mocks::MockGateway;
use crate::routes::{ConfirmOrderRoute, CreateOrderRoute, OrdersRoute, RankingsRoute};

/// A fresh, migrated database in which Alice owns link `ABC123` and product #1 is a $50 mug. Returns the mug's id too.
pub async fn prepare_db() -> (SqliteDatabase, i64) {
    let _ = env_logger::try_init();
    let url = format!("sqlite://{}/amb_server_test_{}.db", std::env::temp_dir().display(), rand::random::<u64>());
    let db = SqliteDatabase::new_with_url(&url, 5).await.expect("Error creating database");
    db.run_migrations().await.expect("Error running DB migrations");
    let mut conn = db.pool().acquire().await.unwrap();
    let alice = users::insert_user(NewUser::ambassador("Alice", "Ambassador", "alice@x.com"), &mut conn).await.unwrap();
    links::insert_link("ABC123", alice.id, &mut conn).await.unwrap();
    let mug = products::insert_product(NewProduct::new("Mug", Cents::from(5000)), &mut conn).await.unwrap();
    debug!("Test database ready at {url}");
    (db, mug.id)
}

pub async fn tear_down(db: SqliteDatabase) {
    db.close().await;
    if let Err(e) = Sqlite::drop_database(db.url()).await {
        warn!("Could not drop test database {}: {e}", db.url());
    }
}

/// Sends `req` to an app wired with the given database and gateway, returning the status and the body.
pub async fn send(req: actix_http::Request, db: &SqliteDatabase, gateway: MockGateway) -> (StatusCode, String) {
    let orders_api = OrderFlowApi::new(db.clone(), gateway, EventProducers::default());
    let rankings_api = RankingsApi::new(db.clone());
    let app = App::new().app_data(web::Data::new(orders_api)).app_data(web::Data::new(rankings_api)).service(
        web::scope("/api")
            .service(OrdersRoute::<SqliteDatabase, MockGateway>::new())
            .service(CreateOrderRoute::<SqliteDatabase, MockGateway>::new())
            .service(ConfirmOrderRoute::<SqliteDatabase, MockGateway>::new())
            .service(RankingsRoute::<SqliteDatabase>::new()),
    );
    let service = test::init_service(app).await;
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let body = res.into_body().try_into_bytes().unwrap();
    (status, String::from_utf8_lossy(&body).into_owned())
}
