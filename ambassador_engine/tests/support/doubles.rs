//! In-memory stand-ins for the payment gateway and the mail transport.
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
    Mutex,
};

use ambassador_engine::{
    db_types::Order,
    traits::{CheckoutGateway, CheckoutGatewayError, CheckoutLineItem, CheckoutSession, Notification, Notifier, NotifierError},
    SqliteDatabase,
};

use crate::support::prepare_env::row_counts;

/// A gateway that accepts every request and hands out `cs_test_<n>` session ids.
#[derive(Clone, Default)]
pub struct RecordingGateway {
    requests: Arc<Mutex<Vec<(i64, Vec<CheckoutLineItem>)>>>,
    counter: Arc<AtomicUsize>,
}

impl RecordingGateway {
    /// `(order id, line items)` for every session requested so far.
    pub fn requests(&self) -> Vec<(i64, Vec<CheckoutLineItem>)> {
        self.requests.lock().unwrap().clone()
    }
}

impl CheckoutGateway for RecordingGateway {
    async fn create_checkout_session(
        &self,
        order: &Order,
        items: &[CheckoutLineItem],
    ) -> Result<CheckoutSession, CheckoutGatewayError> {
        self.requests.lock().unwrap().push((order.id, items.to_vec()));
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let id = format!("cs_test_{n}");
        let url = Some(format!("https://checkout.example.com/pay/{id}"));
        Ok(CheckoutSession { id, url })
    }
}

/// A gateway that is always down. It counts how often it was asked.
#[derive(Clone, Default)]
pub struct FailingGateway {
    calls: Arc<AtomicUsize>,
}

impl FailingGateway {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl CheckoutGateway for FailingGateway {
    async fn create_checkout_session(
        &self,
        _order: &Order,
        _items: &[CheckoutLineItem],
    ) -> Result<CheckoutSession, CheckoutGatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(CheckoutGatewayError::Unavailable("connection refused".into()))
    }
}

/// A gateway that hands out the same session id for every order.
#[derive(Clone)]
pub struct FixedSessionGateway {
    id: String,
}

impl FixedSessionGateway {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl CheckoutGateway for FixedSessionGateway {
    async fn create_checkout_session(
        &self,
        _order: &Order,
        _items: &[CheckoutLineItem],
    ) -> Result<CheckoutSession, CheckoutGatewayError> {
        Ok(CheckoutSession { id: self.id.clone(), url: None })
    }
}

/// A gateway that, while the order transaction is still open, counts the rows another connection can see.
#[derive(Clone)]
pub struct PeekingGateway {
    db: SqliteDatabase,
    seen: Arc<Mutex<Vec<(i64, i64)>>>,
}

impl PeekingGateway {
    pub fn new(db: SqliteDatabase) -> Self {
        Self { db, seen: Arc::new(Mutex::new(Vec::new())) }
    }

    pub fn seen(&self) -> Vec<(i64, i64)> {
        self.seen.lock().unwrap().clone()
    }
}

impl CheckoutGateway for PeekingGateway {
    async fn create_checkout_session(
        &self,
        order: &Order,
        _items: &[CheckoutLineItem],
    ) -> Result<CheckoutSession, CheckoutGatewayError> {
        let counts = row_counts(&self.db).await;
        self.seen.lock().unwrap().push(counts);
        Ok(CheckoutSession { id: format!("cs_peek_{}", order.id), url: None })
    }
}

#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    fail: bool,
}

impl RecordingNotifier {
    /// A notifier whose transport is down. Attempts are still recorded.
    pub fn failing() -> Self {
        Self { fail: true, ..Default::default() }
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifierError> {
        self.sent.lock().unwrap().push(notification);
        if self.fail {
            Err(NotifierError::DeliveryFailed("mail relay is down".into()))
        } else {
            Ok(())
        }
    }
}
