//! `SqliteDatabase` is the SQLite backend of the ambassador engine. It implements every storage trait in the
//! [`crate::traits`] module.
use std::{fmt::Debug, future::Future};

use amb_common::{helpers::non_blank, Cents};
use log::*;
use sqlx::SqlitePool;

use super::db::{links, new_pool, orders, products, rankings, users};
use crate::{
    db_types::{CompletionResult, NewOrder, Order, Product, RankingEntry, ReferralLink, User},
    traits::{
        AmbassadorDatabase,
        CheckoutGatewayError,
        CheckoutSession,
        LinkManagement,
        OrderManagement,
        ProductCatalog,
        RankingStore,
        StoreError,
        UserManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        trace!("🗃️ Creating new database connection pool with url {url}");
        let pool = new_pool(url, max_connections).await?;
        let url = url.to_string();
        Ok(Self { url, pool })
    }

    /// Brings the schema up to date.
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./src/sqlite/migrations").run(&self.pool).await?;
        info!("🗃️ Database migrations complete");
        Ok(())
    }

    /// Returns a reference to the database connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl AmbassadorDatabase for SqliteDatabase {
    fn url(&self) -> &str {
        self.url.as_str()
    }
}

impl LinkManagement for SqliteDatabase {
    async fn fetch_link_by_code(&self, code: &str) -> Result<Option<ReferralLink>, StoreError> {
        let Some(code) = non_blank(code) else {
            return Ok(None);
        };
        let mut conn = self.pool.acquire().await?;
        let link = links::fetch_link_by_code(code, &mut conn).await?;
        Ok(link)
    }
}

impl ProductCatalog for SqliteDatabase {
    async fn fetch_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        if id < 1 {
            return Ok(None);
        }
        let mut conn = self.pool.acquire().await?;
        let product = products::fetch_product(id, &mut conn).await?;
        Ok(product)
    }
}

impl OrderManagement for SqliteDatabase {
    async fn create_order_with_checkout<F, Fut>(
        &self,
        order: NewOrder,
        open_session: F,
    ) -> Result<(Order, CheckoutSession), StoreError>
    where
        F: FnOnce(Order) -> Fut,
        Fut: Future<Output = Result<CheckoutSession, CheckoutGatewayError>>,
    {
        if order.items.is_empty() {
            return Err(StoreError::EmptyOrder);
        }
        let mut tx = self.pool.begin().await?;
        // Dropping `tx` on an early return rolls everything back
        let order = orders::insert_order(order, &mut tx).await?;
        let order_id = order.id;
        let items = order.items.clone();
        let session = match open_session(order).await {
            Ok(session) => session,
            Err(e) => {
                warn!("🗃️ Could not open a checkout session for order #{order_id}. Rolling back. {e}");
                if let Err(rb) = tx.rollback().await {
                    error!("🗃️ Rollback of order #{order_id} failed. {rb}");
                }
                return Err(StoreError::CheckoutFailed(e));
            },
        };
        let mut order = orders::attach_payment_reference(order_id, &session.id, &mut tx)
            .await?
            .ok_or(StoreError::PaymentReferenceAlreadySet(order_id))?;
        order.items = items;
        tx.commit().await?;
        info!("🗃️ Order #{order_id} stored with payment reference {}", session.id);
        Ok((order, session))
    }

    async fn fetch_order_by_payment_reference(&self, reference: &str) -> Result<Option<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        match orders::fetch_order_header_by_reference(reference, &mut conn).await? {
            Some(order) => Ok(Some(orders::with_items(order, &mut conn).await?)),
            None => Ok(None),
        }
    }

    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        match orders::fetch_order_header(id, &mut conn).await? {
            Some(order) => Ok(Some(orders::with_items(order, &mut conn).await?)),
            None => Ok(None),
        }
    }

    async fn finalize_order(&self, order_id: i64) -> Result<bool, StoreError> {
        let mut conn = self.pool.acquire().await?;
        if orders::mark_completed(order_id, &mut conn).await?.is_some() {
            debug!("🗃️ Order #{order_id} marked as completed");
            return Ok(true);
        }
        match orders::fetch_order_header(order_id, &mut conn).await? {
            Some(_) => Ok(false),
            None => Err(StoreError::OrderNotFound(order_id)),
        }
    }

    async fn complete_order_by_payment_reference(&self, reference: &str) -> Result<CompletionResult, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let order = orders::fetch_order_header_by_reference(reference, &mut conn)
            .await?
            .ok_or_else(|| StoreError::PaymentReferenceNotFound(reference.to_string()))?;
        let result = match orders::mark_completed(order.id, &mut conn).await? {
            Some(completed) => {
                debug!("🗃️ Order #{} marked as completed", completed.id);
                CompletionResult::Completed(orders::with_items(completed, &mut conn).await?)
            },
            None => {
                debug!("🗃️ Order #{} was already completed", order.id);
                let current = orders::fetch_order_header(order.id, &mut conn).await?.unwrap_or(order);
                CompletionResult::AlreadyCompleted(orders::with_items(current, &mut conn).await?)
            },
        };
        Ok(result)
    }

    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let orders = orders::fetch_orders(&mut conn).await?;
        Ok(orders)
    }
}

impl UserManagement for SqliteDatabase {
    async fn fetch_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let user = users::fetch_user(id, &mut conn).await?;
        Ok(user)
    }
}

impl RankingStore for SqliteDatabase {
    async fn increment_score(&self, member: &str, amount: Cents) -> Result<Cents, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let score = rankings::increment_score(member, amount, &mut conn).await?;
        trace!("🗃️ Ranking for {member} is now {score}");
        Ok(score)
    }

    async fn fetch_rankings(&self, limit: i64) -> Result<Vec<RankingEntry>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let entries = rankings::fetch_rankings(limit, &mut conn).await?;
        Ok(entries)
    }
}
