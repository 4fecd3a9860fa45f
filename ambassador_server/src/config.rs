//! Server configuration.
//!
//! Everything is read from `AMB_*` environment variables (a `.env` file is loaded first by `main`). Missing or invalid
//! values are logged and replaced with defaults, so the server always starts with a usable configuration; the one
//! exception is the Stripe API key, without which no checkout session can be created.
use std::{env, fmt::Display, str::FromStr};

use amb_common::helpers::parse_boolean_flag;
use ambassador_engine::{order_objects::RevenueSplit, DEFAULT_ADMIN_EMAIL};
use log::*;
use stripe_tools::StripeConfig;

const DEFAULT_AMB_HOST: &str = "127.0.0.1";
const DEFAULT_AMB_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/ambassador_store.db";
const DEFAULT_MAX_DB_CONNECTIONS: u32 = 25;
const DEFAULT_EVENT_BUFFER_SIZE: usize = 25;
const DEFAULT_SMTP_HOST: &str = "localhost";
const DEFAULT_SMTP_PORT: u16 = 1025;
const DEFAULT_MAIL_FROM: &str = "no-reply@ambassador.store";

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub max_db_connections: u32,
    /// Apply pending schema migrations on start-up.
    pub run_migrations: bool,
    pub stripe: StripeConfig,
    pub mail: MailConfig,
    pub revenue_split: RevenueSplit,
    /// Capacity of the order-completed event queue. Publishing never blocks a request, even when it is full.
    pub event_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_AMB_HOST.to_string(),
            port: DEFAULT_AMB_PORT,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_db_connections: DEFAULT_MAX_DB_CONNECTIONS,
            run_migrations: true,
            stripe: StripeConfig::default(),
            mail: MailConfig::default(),
            revenue_split: RevenueSplit::default(),
            event_buffer_size: DEFAULT_EVENT_BUFFER_SIZE,
        }
    }
}

/// The SMTP relay that carries settlement notifications.
#[derive(Clone, Debug)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from: String,
    /// Receives a notification for every completed order.
    pub admin_email: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            smtp_host: DEFAULT_SMTP_HOST.to_string(),
            smtp_port: DEFAULT_SMTP_PORT,
            from: DEFAULT_MAIL_FROM.to_string(),
            admin_email: DEFAULT_ADMIN_EMAIL.to_string(),
        }
    }
}

impl MailConfig {
    pub fn from_env_or_default() -> Self {
        let smtp_host = env::var("AMB_SMTP_HOST").unwrap_or_else(|_| {
            info!("🪛️ AMB_SMTP_HOST is not set. Using {DEFAULT_SMTP_HOST}");
            DEFAULT_SMTP_HOST.to_string()
        });
        let smtp_port = parse_env("AMB_SMTP_PORT", DEFAULT_SMTP_PORT);
        let from = env::var("AMB_MAIL_FROM").unwrap_or_else(|_| DEFAULT_MAIL_FROM.to_string());
        let admin_email = env::var("AMB_ADMIN_EMAIL").unwrap_or_else(|_| {
            warn!("🪛️ AMB_ADMIN_EMAIL is not set. Platform notifications will go to {DEFAULT_ADMIN_EMAIL}");
            DEFAULT_ADMIN_EMAIL.to_string()
        });
        Self { smtp_host, smtp_port, from, admin_email }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("AMB_HOST").ok().unwrap_or_else(|| DEFAULT_AMB_HOST.into());
        let port = parse_env("AMB_PORT", DEFAULT_AMB_PORT);
        let database_url = env::var("AMB_DATABASE_URL").ok().unwrap_or_else(|| {
            warn!("🪛️ AMB_DATABASE_URL is not set. Using {DEFAULT_DATABASE_URL}");
            DEFAULT_DATABASE_URL.to_string()
        });
        let max_db_connections = parse_env("AMB_MAX_DB_CONNECTIONS", DEFAULT_MAX_DB_CONNECTIONS).max(1);
        let run_migrations = parse_boolean_flag(env::var("AMB_RUN_MIGRATIONS").ok(), true);
        let stripe = StripeConfig::new_from_env_or_default();
        let mail = MailConfig::from_env_or_default();
        let revenue_split = revenue_split_from_env();
        let event_buffer_size = parse_env("AMB_EVENT_BUFFER_SIZE", DEFAULT_EVENT_BUFFER_SIZE).max(1);
        Self {
            host,
            port,
            database_url,
            max_db_connections,
            run_migrations,
            stripe,
            mail,
            revenue_split,
            event_buffer_size,
        }
    }
}

fn revenue_split_from_env() -> RevenueSplit {
    let default_percent = RevenueSplit::default().platform_percent();
    let percent = parse_env("AMB_PLATFORM_REVENUE_PERCENT", default_percent);
    RevenueSplit::new(percent).unwrap_or_else(|| {
        error!(
            "🪛️ AMB_PLATFORM_REVENUE_PERCENT must be between 0 and 100, but was {percent}. Using the default, \
             {default_percent}%, instead."
        );
        RevenueSplit::default()
    })
}

/// Reads and parses `name`, falling back to `default` (with a log message) if it is unset or invalid.
fn parse_env<T>(name: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match env::var(name) {
        Ok(s) => s.trim().parse::<T>().unwrap_or_else(|e| {
            error!("🪛️ {s} is not a valid value for {name}. {e} Using the default, {default}, instead.");
            default
        }),
        Err(_) => {
            debug!("🪛️ {name} is not set. Using the default, {default}.");
            default
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_env_falls_back_on_garbage() {
        env::set_var("AMB_TEST_PARSE_ENV_GOOD", " 8080 ");
        env::set_var("AMB_TEST_PARSE_ENV_BAD", "eighty");
        assert_eq!(parse_env::<u16>("AMB_TEST_PARSE_ENV_GOOD", 1), 8080);
        assert_eq!(parse_env::<u16>("AMB_TEST_PARSE_ENV_BAD", 1), 1);
        assert_eq!(parse_env::<u16>("AMB_TEST_PARSE_ENV_MISSING", 7), 7);
    }

    #[test]
    fn defaults() {
        let config = ServerConfig::new("0.0.0.0", 9000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9000);
        assert_eq!(config.revenue_split.platform_percent(), 10);
        assert!(config.run_migrations);
        assert_eq!(config.mail.admin_email, "admin@admin.com");
        assert_eq!(config.mail.smtp_port, 1025);
    }
}
