//! Stripe Checkout as the engine's payment gateway.
use amb_common::helpers::non_blank;
use ambassador_engine::{
    db_types::Order,
    traits::{CheckoutGateway, CheckoutGatewayError, CheckoutLineItem, CheckoutSession},
};
use log::*;
use stripe_tools::{NewCheckoutSession, SessionLineItem, StripeApi, StripeApiError};

#[derive(Clone)]
pub struct StripeCheckout {
    api: StripeApi,
}

impl StripeCheckout {
    pub fn new(api: StripeApi) -> Self {
        Self { api }
    }
}

impl CheckoutGateway for StripeCheckout {
    async fn create_checkout_session(
        &self,
        order: &Order,
        items: &[CheckoutLineItem],
    ) -> Result<CheckoutSession, CheckoutGatewayError> {
        let request = new_checkout_session(order, items);
        trace!("💳️ Requesting a checkout session for order #{}", order.id);
        let session = self.api.create_checkout_session(&request).await.map_err(|e| {
            warn!("💳️ Stripe could not create a checkout session for order #{}. {e}", order.id);
            gateway_error(e)
        })?;
        Ok(CheckoutSession { id: session.id, url: session.url })
    }
}

fn new_checkout_session(order: &Order, items: &[CheckoutLineItem]) -> NewCheckoutSession {
    let line_items = items
        .iter()
        .map(|item| SessionLineItem {
            name: item.title.clone(),
            description: item.description.clone(),
            image: non_blank(&item.image).map(String::from),
            unit_amount: item.unit_price.value(),
            quantity: item.quantity,
        })
        .collect();
    NewCheckoutSession {
        line_items,
        client_reference_id: Some(order.id.to_string()),
        customer_email: non_blank(&order.customer.email).map(String::from),
    }
}

fn gateway_error(e: StripeApiError) -> CheckoutGatewayError {
    match e {
        StripeApiError::Initialization(s) => CheckoutGatewayError::Misconfigured(s),
        StripeApiError::InvalidRequest(s) => CheckoutGatewayError::InvalidRequest(s),
        StripeApiError::RestResponseError(s) | StripeApiError::JsonError(s) => CheckoutGatewayError::Unavailable(s),
        StripeApiError::QueryError { status, message } => CheckoutGatewayError::Rejected { status, message },
    }
}
