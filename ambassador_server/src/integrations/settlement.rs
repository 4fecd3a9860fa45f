use ambassador_engine::{create_settlement_hooks, events::EventHandlers, SettlementApi, SqliteDatabase};
use log::*;

use crate::{config::ServerConfig, integrations::mail::SmtpNotifier};

/// Builds the event handlers that run settlement (leaderboard update and notifications) whenever an order completes.
pub fn create_settlement_event_handlers(config: &ServerConfig, db: SqliteDatabase) -> EventHandlers {
    let notifier = SmtpNotifier::new(&config.mail);
    let api = SettlementApi::new(db, notifier).with_admin_email(config.mail.admin_email.clone());
    debug!("📬️ Settlement hook registered. {api:?}");
    EventHandlers::new(config.event_buffer_size, create_settlement_hooks(api))
}
