use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION},
    Client,
    Method,
};
use serde::de::DeserializeOwned;

use crate::{
    data_objects::StripeErrorResponse,
    helpers::{checkout_session_form, describe_stripe_error},
    CheckoutSession,
    NewCheckoutSession,
    StripeApiError,
    StripeConfig,
};

#[derive(Clone)]
pub struct StripeApi {
    config: StripeConfig,
    client: Arc<Client>,
}

impl StripeApi {
    pub fn new(config: StripeConfig) -> Result<Self, StripeApiError> {
        if config.api_key.is_empty() {
            return Err(StripeApiError::Initialization("The Stripe API key has not been configured".into()));
        }
        let mut headers = HeaderMap::with_capacity(1);
        let mut val = HeaderValue::from_str(format!("Bearer {}", config.api_key.reveal()).as_str())
            .map_err(|e| StripeApiError::Initialization(e.to_string()))?;
        val.set_sensitive(true);
        headers.insert(AUTHORIZATION, val);
        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| StripeApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    async fn rest_query<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Option<&[(String, String)]>,
    ) -> Result<T, StripeApiError> {
        let url = self.url(path);
        trace!("💳️ Sending REST query: {method} {url}");
        let mut req = self.client.request(method, url);
        if let Some(form) = form {
            req = req.form(form);
        }
        let response = req.send().await.map_err(|e| StripeApiError::RestResponseError(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            trace!("💳️ REST query successful. {status}");
            response.json::<T>().await.map_err(|e| StripeApiError::JsonError(e.to_string()))
        } else {
            let text = response.text().await.map_err(|e| StripeApiError::RestResponseError(e.to_string()))?;
            let message = serde_json::from_str::<StripeErrorResponse>(&text)
                .map(|r| describe_stripe_error(&r.error))
                .unwrap_or(text);
            Err(StripeApiError::QueryError { status: status.as_u16(), message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/v1{path}", self.config.api_url.trim_end_matches('/'))
    }

    /// Creates a hosted checkout session for the given line items, using the configured success and cancel URLs.
    pub async fn create_checkout_session(
        &self,
        session: &NewCheckoutSession,
    ) -> Result<CheckoutSession, StripeApiError> {
        let form = checkout_session_form(
            session,
            &self.config.success_url,
            &self.config.cancel_url,
            &self.config.currency,
        )?;
        debug!("💳️ Creating checkout session with {} line items", session.line_items.len());
        let result = self.rest_query::<CheckoutSession>(Method::POST, "/checkout/sessions", Some(&form)).await?;
        info!("💳️ Checkout session {} created", result.id);
        Ok(result)
    }
}
