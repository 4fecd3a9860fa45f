use amb_common::Cents;
use ambassador_engine::{
    db_types::{NewProduct, NewUser, Product, ReferralLink, User},
    sqlite_db::{links, orders, products, users},
    traits::AmbassadorDatabase,
    SqliteDatabase,
};
use log::*;
use sqlx::{migrate::MigrateDatabase, Sqlite};

pub fn random_db_path() -> String {
    let dir = std::env::temp_dir();
    format!("sqlite://{}/amb_test_store_{}.db", dir.display(), rand::random::<u64>())
}

/// Creates a fresh database at `url`, runs the migrations and returns a connection to it.
pub async fn prepare_test_env(url: &str) -> SqliteDatabase {
    dotenvy::from_filename(".env.test").ok();
    let _ = env_logger::try_init();
    if let Err(e) = Sqlite::drop_database(url).await {
        trace!("🚀️ Nothing to drop at {url}: {e}");
    }
    Sqlite::create_database(url).await.expect("Error creating database");
    let db = SqliteDatabase::new_with_url(url, 5).await.expect("Error creating connection to database");
    db.run_migrations().await.expect("Error running DB migrations");
    debug!("🚀️ Test database ready at {url}");
    db
}

pub async fn tear_down(db: SqliteDatabase) {
    db.close().await;
    if let Err(e) = Sqlite::drop_database(db.url()).await {
        warn!("🚀️ Could not drop test database {}: {e}", db.url());
    }
}

/// The fixture every test starts from: Alice owns link `ABC123`, and the catalog has a $50 mug and a $25.99 t-shirt.
pub struct Seed {
    pub alice: User,
    pub link: ReferralLink,
    pub mug: Product,
    pub tee: Product,
}

pub async fn seed(db: &SqliteDatabase) -> Seed {
    let mut conn = db.pool().acquire().await.expect("Could not get a connection");
    let alice = users::insert_user(NewUser::ambassador("Alice", "Ambassador", "alice@x.com"), &mut conn)
        .await
        .expect("Could not insert Alice");
    let link = links::insert_link("ABC123", alice.id, &mut conn).await.expect("Could not insert link");
    let mug = products::insert_product(
        NewProduct::new("Mug", Cents::from(5000)).with_description("A big mug").with_image("https://img/mug.png"),
        &mut conn,
    )
    .await
    .expect("Could not insert mug");
    let tee = products::insert_product(NewProduct::new("T-shirt", Cents::from(2599)), &mut conn)
        .await
        .expect("Could not insert t-shirt");
    Seed { alice, link, mug, tee }
}

/// Returns `(orders, order_items)` row counts.
pub async fn row_counts(db: &SqliteDatabase) -> (i64, i64) {
    let mut conn = db.pool().acquire().await.expect("Could not get a connection");
    let orders = orders::count_orders(&mut conn).await.expect("Could not count orders");
    let items = orders::count_order_items(&mut conn).await.expect("Could not count order items");
    (orders, items)
}
