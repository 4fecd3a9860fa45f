use std::time::Duration;

use amb_common::{Secret, DEFAULT_CURRENCY_CODE};
use log::*;

pub const DEFAULT_STRIPE_API_URL: &str = "https://api.stripe.com";
pub const DEFAULT_SUCCESS_URL: &str = "http://localhost:5000/success?source={CHECKOUT_SESSION_ID}";
pub const DEFAULT_CANCEL_URL: &str = "http://localhost:5000/error";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Base URL of the Stripe API. Overridable so that tests and staging can point at a mock server.
    pub api_url: String,
    pub api_key: Secret<String>,
    /// Where Stripe redirects the customer after a successful payment. Stripe substitutes
    /// `{CHECKOUT_SESSION_ID}` with the session id, which the storefront posts back to confirm the order.
    pub success_url: String,
    pub cancel_url: String,
    pub currency: String,
    /// Upper bound on a single API call. Checkout sessions are opened while the order transaction is held.
    pub timeout: Duration,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_STRIPE_API_URL.to_string(),
            api_key: Secret::default(),
            success_url: DEFAULT_SUCCESS_URL.to_string(),
            cancel_url: DEFAULT_CANCEL_URL.to_string(),
            currency: DEFAULT_CURRENCY_CODE.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl StripeConfig {
    pub fn new_from_env_or_default() -> Self {
        let api_url = std::env::var("AMB_STRIPE_API_URL").unwrap_or_else(|_| {
            debug!("AMB_STRIPE_API_URL not set, using {DEFAULT_STRIPE_API_URL}");
            DEFAULT_STRIPE_API_URL.to_string()
        });
        let api_key: Secret<String> = std::env::var("AMB_STRIPE_API_KEY")
            .unwrap_or_else(|_| {
                warn!("AMB_STRIPE_API_KEY not set. Checkout sessions cannot be created until it is configured.");
                String::default()
            })
            .into();
        let success_url = std::env::var("AMB_CHECKOUT_SUCCESS_URL").unwrap_or_else(|_| {
            warn!("AMB_CHECKOUT_SUCCESS_URL not set, using (probably useless) default {DEFAULT_SUCCESS_URL}");
            DEFAULT_SUCCESS_URL.to_string()
        });
        let cancel_url = std::env::var("AMB_CHECKOUT_CANCEL_URL").unwrap_or_else(|_| {
            warn!("AMB_CHECKOUT_CANCEL_URL not set, using (probably useless) default {DEFAULT_CANCEL_URL}");
            DEFAULT_CANCEL_URL.to_string()
        });
        let currency = std::env::var("AMB_CURRENCY")
            .map(|s| s.trim().to_lowercase())
            .unwrap_or_else(|_| DEFAULT_CURRENCY_CODE.to_string());
        let timeout_secs = std::env::var("AMB_STRIPE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| match s.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Some(secs),
                _ => {
                    warn!("AMB_STRIPE_TIMEOUT_SECS is not a positive number of seconds: {s}");
                    None
                },
            })
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        let timeout = Duration::from_secs(timeout_secs);
        Self { api_url, api_key, success_url, cancel_url, currency, timeout }
    }
}
