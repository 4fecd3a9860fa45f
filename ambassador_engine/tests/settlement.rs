use amb_common::Cents;
use ambassador_engine::{
    create_settlement_hooks,
    db_types::{CompletionResult, Customer, OrderStatus},
    events::EventHandlers,
    order_objects::{NewOrderRequest, ProductQuantity},
    sqlite_db::rankings,
    traits::{OrderManagement, RankingStore},
    OrderFlowApi,
    OrderFlowError,
    RankingsApi,
    SettlementApi,
    SqliteDatabase,
};
use futures_util::future::join_all;
use support::{
    doubles::{RecordingGateway, RecordingNotifier},
    prepare_env::{prepare_test_env, random_db_path, seed, tear_down, Seed},
};
use tokio::task::JoinHandle;

mod support;

struct Harness {
    api: OrderFlowApi<SqliteDatabase, RecordingGateway>,
    db: SqliteDatabase,
    notifier: RecordingNotifier,
    handlers: Vec<JoinHandle<()>>,
    seed: Seed,
}

impl Harness {
    /// Drops the order flow API (and with it every event producer), then waits for all settlement jobs to finish.
    async fn drain(self) -> (SqliteDatabase, RecordingNotifier) {
        let Harness { api, db, notifier, handlers, .. } = self;
        drop(api);
        join_all(handlers).await;
        (db, notifier)
    }
}

async fn setup(notifier: RecordingNotifier) -> Harness {
    let db = prepare_test_env(&random_db_path()).await;
    let seed = seed(&db).await;
    let settlement = SettlementApi::new(db.clone(), notifier.clone()).with_admin_email("ops@example.com");
    let handlers = EventHandlers::new(4, create_settlement_hooks(settlement));
    let producers = handlers.producers();
    let handlers = handlers.start_handlers();
    let api = OrderFlowApi::new(db.clone(), RecordingGateway::default(), producers);
    Harness { api, db, notifier, handlers, seed }
}

fn two_mugs(seed: &Seed) -> NewOrderRequest {
    NewOrderRequest {
        code: "ABC123".into(),
        customer: Customer { first_name: "Bob".into(), email: "bob@example.com".into(), ..Default::default() },
        products: vec![ProductQuantity::new(seed.mug.id, 2)],
    }
}

#[tokio::test]
async fn duplicate_confirmation_settles_once() {
    let harness = setup(RecordingNotifier::default()).await;
    let created = harness.api.create_order(two_mugs(&harness.seed)).await.unwrap();
    let reference = created.session.id.clone();

    let first = harness.api.complete_order(&reference).await.unwrap();
    assert!(first.is_first_completion());
    assert_eq!(first.order().status(), OrderStatus::Completed);
    let second = harness.api.complete_order(&reference).await.unwrap();
    assert!(matches!(second, CompletionResult::AlreadyCompleted(_)));
    assert!(second.order().completed);
    assert_eq!(second.order().items.len(), 1);

    let (db, notifier) = harness.drain().await;
    let board = db.fetch_rankings(10).await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].name, "Alice Ambassador");
    assert_eq!(board[0].score, Cents::from(9000));

    let sent = notifier.sent();
    assert_eq!(sent.len(), 2);
    let to_alice = sent.iter().find(|n| n.to == "alice@x.com").unwrap();
    assert_eq!(to_alice.body, "You earned $90.00 from the link #ABC123");
    let to_ops = sent.iter().find(|n| n.to == "ops@example.com").unwrap();
    assert_eq!(to_ops.body, format!("Order #{} with a total of $10.00 has been completed", created.order.id));
    tear_down(db).await;
}

#[tokio::test]
async fn concurrent_confirmations_settle_once() {
    let harness = setup(RecordingNotifier::default()).await;
    let created = harness.api.create_order(two_mugs(&harness.seed)).await.unwrap();
    let reference = created.session.id.as_str();

    let results = join_all((0..10).map(|_| harness.api.complete_order(reference))).await;
    let winners = results.iter().filter(|r| r.as_ref().unwrap().is_first_completion()).count();
    assert_eq!(winners, 1);

    let (db, notifier) = harness.drain().await;
    let board = db.fetch_rankings(10).await.unwrap();
    assert_eq!(board[0].score, Cents::from(9000));
    assert_eq!(notifier.sent().len(), 2);
    tear_down(db).await;
}

#[tokio::test]
async fn unknown_payment_reference_changes_nothing() {
    let harness = setup(RecordingNotifier::default()).await;
    let created = harness.api.create_order(two_mugs(&harness.seed)).await.unwrap();

    for reference in ["cs_does_not_exist", ""] {
        let err = harness.api.complete_order(reference).await.unwrap_err();
        assert!(matches!(err, OrderFlowError::OrderNotFound(_)), "{err}");
    }

    let (db, notifier) = harness.drain().await;
    assert!(db.fetch_rankings(10).await.unwrap().is_empty());
    assert!(notifier.sent().is_empty());
    let order = db.fetch_order_by_id(created.order.id).await.unwrap().unwrap();
    assert!(!order.completed);
    tear_down(db).await;
}

#[tokio::test]
async fn finalize_is_idempotent() {
    let harness = setup(RecordingNotifier::default()).await;
    let created = harness.api.create_order(two_mugs(&harness.seed)).await.unwrap();
    let id = created.order.id;
    assert!(harness.db.finalize_order(id).await.unwrap());
    assert!(!harness.db.finalize_order(id).await.unwrap());
    assert!(harness.db.finalize_order(id + 100).await.is_err());
    // A direct finalize bypasses the order flow, so the confirmation that follows must not settle
    let result = harness.api.complete_order(&created.session.id).await.unwrap();
    assert!(!result.is_first_completion());
    let (db, notifier) = harness.drain().await;
    assert!(notifier.sent().is_empty());
    tear_down(db).await;
}

#[tokio::test]
async fn notification_failures_do_not_stop_settlement() {
    let harness = setup(RecordingNotifier::failing()).await;
    let created = harness.api.create_order(two_mugs(&harness.seed)).await.unwrap();
    let order = created.order.clone();
    harness.api.complete_order(&created.session.id).await.unwrap();
    let (db, notifier) = harness.drain().await;
    // Both sends were attempted even though the first one failed
    assert_eq!(notifier.sent().len(), 2);
    assert_eq!(db.fetch_rankings(10).await.unwrap()[0].score, Cents::from(9000));

    let settlement = SettlementApi::new(db.clone(), RecordingNotifier::failing());
    let report = settlement.settle(&order).await;
    assert_eq!(report.order_id, order.id);
    assert_eq!(report.summary.ambassador_revenue, Cents::from(9000));
    assert_eq!(report.summary.platform_revenue, Cents::from(1000));
    assert_eq!(report.new_score, Some(Cents::from(18_000)));
    assert!(!report.ambassador_notified);
    assert!(!report.admin_notified);
    tear_down(db).await;
}

#[tokio::test]
async fn ranking_increments_are_atomic() {
    let db = prepare_test_env(&random_db_path()).await;
    let increments = join_all((1..=20).map(|i| db.increment_score("Alice Ambassador", Cents::from(i)))).await;
    assert!(increments.iter().all(|r| r.is_ok()));
    db.increment_score("Carol Closer", Cents::from(500)).await.unwrap();

    let mut conn = db.pool().acquire().await.unwrap();
    let score = rankings::fetch_score("Alice Ambassador", &mut conn).await.unwrap();
    assert_eq!(score, Some(Cents::from(210)));
    drop(conn);

    let board = db.fetch_rankings(10).await.unwrap();
    assert_eq!(board[0].name, "Carol Closer");
    assert_eq!(board[1].score, Cents::from(210));
    assert_eq!(db.fetch_rankings(1).await.unwrap().len(), 1);

    let api = RankingsApi::new(db.clone());
    assert_eq!(api.leaderboard(None).await.unwrap().len(), 2);
    assert_eq!(api.leaderboard(Some(0)).await.unwrap().len(), 1);
    assert_eq!(api.leaderboard(Some(-5)).await.unwrap()[0].name, "Carol Closer");
    tear_down(db).await;
}
