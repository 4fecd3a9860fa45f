//! Post-completion settlement.
//!
//! Settlement runs in the background after an order has been marked as completed. It credits the ambassador on the
//! leaderboard and notifies the ambassador and the platform operator. Every step is independent: a failure is logged
//! and the remaining steps still run. Nothing here can undo the completion.
use std::fmt::Debug;

use amb_common::Cents;
use log::*;
use serde::{Deserialize, Serialize};

use crate::{
    db_types::Order,
    events::{EventHooks, OrderCompletedEvent},
    traits::{Notification, Notifier, RankingStore, UserManagement},
};

pub const DEFAULT_ADMIN_EMAIL: &str = "admin@admin.com";

/// Revenue totals for a single order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    pub ambassador_revenue: Cents,
    pub platform_revenue: Cents,
}

impl SettlementSummary {
    pub fn from_order(order: &Order) -> Self {
        Self { ambassador_revenue: order.ambassador_revenue(), platform_revenue: order.platform_revenue() }
    }
}

/// What happened during a settlement run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReport {
    pub order_id: i64,
    pub summary: SettlementSummary,
    /// The ambassador's new leaderboard score, if the ranking update succeeded.
    pub new_score: Option<Cents>,
    pub ambassador_notified: bool,
    pub admin_notified: bool,
}

#[derive(Clone)]
pub struct SettlementApi<D, N> {
    db: D,
    notifier: N,
    admin_email: String,
}

impl<D, N> Debug for SettlementApi<D, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SettlementApi (admin: {})", self.admin_email)
    }
}

impl<D, N> SettlementApi<D, N> {
    pub fn new(db: D, notifier: N) -> Self {
        Self { db, notifier, admin_email: DEFAULT_ADMIN_EMAIL.to_string() }
    }

    pub fn with_admin_email<S: Into<String>>(mut self, admin_email: S) -> Self {
        self.admin_email = admin_email.into();
        self
    }
}

impl<D, N> SettlementApi<D, N>
where
    D: RankingStore + UserManagement,
    N: Notifier,
{
    pub async fn settle(&self, order: &Order) -> SettlementReport {
        let summary = SettlementSummary::from_order(order);
        debug!(
            "💸️ Settling order #{}: {} to ambassador #{}, {} to the platform",
            order.id, summary.ambassador_revenue, order.ambassador_id, summary.platform_revenue
        );
        let new_score = self.update_ranking(order, summary.ambassador_revenue).await;
        let ambassador_notified = self.notify(ambassador_notification(order, &summary)).await;
        let admin_notified = self.notify(admin_notification(&self.admin_email, order, &summary)).await;
        info!(
            "💸️ Order #{} settled. Ranking updated: {}. Ambassador notified: {ambassador_notified}. Admin notified: \
             {admin_notified}",
            order.id,
            new_score.is_some()
        );
        SettlementReport { order_id: order.id, summary, new_score, ambassador_notified, admin_notified }
    }

    async fn update_ranking(&self, order: &Order, amount: Cents) -> Option<Cents> {
        let user = match self.db.fetch_user(order.ambassador_id).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                error!("💸️ Ambassador #{} for order #{} does not exist. Skipping ranking update.", order.ambassador_id, order.id);
                return None;
            },
            Err(e) => {
                error!("💸️ Could not load ambassador #{} for order #{}. {e}", order.ambassador_id, order.id);
                return None;
            },
        };
        match self.db.increment_score(&user.name(), amount).await {
            Ok(score) => {
                debug!("💸️ {} now has a ranking score of {score}", user.name());
                Some(score)
            },
            Err(e) => {
                error!("💸️ Could not add {amount} to the ranking of {} for order #{}. {e}", user.name(), order.id);
                None
            },
        }
    }

    async fn notify(&self, notification: Notification) -> bool {
        let to = notification.to.clone();
        match self.notifier.send(notification).await {
            Ok(()) => {
                debug!("💸️ Notification sent to {to}");
                true
            },
            Err(e) => {
                warn!("💸️ Could not notify {to}. {e}");
                false
            },
        }
    }
}

fn ambassador_notification(order: &Order, summary: &SettlementSummary) -> Notification {
    Notification::new(
        order.ambassador_email.clone(),
        "An order has been completed".to_string(),
        format!("You earned {} from the link #{}", summary.ambassador_revenue, order.code),
    )
}

fn admin_notification(admin_email: &str, order: &Order, summary: &SettlementSummary) -> Notification {
    Notification::new(
        admin_email.to_string(),
        "An order has been completed".to_string(),
        format!("Order #{} with a total of {} has been completed", order.id, summary.platform_revenue),
    )
}

/// Registers `api` as the order-completed hook.
pub fn create_settlement_hooks<D, N>(api: SettlementApi<D, N>) -> EventHooks
where
    D: RankingStore + UserManagement + Clone + Send + Sync + 'static,
    N: Notifier + Clone + Send + Sync + 'static,
{
    let mut hooks = EventHooks::default();
    hooks.on_order_completed(move |event: OrderCompletedEvent| {
        let api = api.clone();
        Box::pin(async move {
            api.settle(&event.order).await;
        })
    });
    hooks
}
