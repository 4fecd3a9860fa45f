use std::fmt::Debug;

use amb_common::{helpers::non_blank, Cents};
use log::*;

use crate::{
    amb_api::{
        errors::OrderFlowError,
        order_objects::{AssembledOrder, NewOrderRequest, OrderCreated, RevenueSplit},
    },
    db_types::{CompletionResult, NewOrder, NewOrderItem, Order, ReferralLink},
    events::{EventProducers, OrderCompletedEvent},
    traits::{AmbassadorDatabase, CheckoutGateway, CheckoutLineItem},
};

/// `OrderFlowApi` drives an order from the customer's request through to payment confirmation.
///
/// Creation is synchronous and all-or-nothing: the order, its line items and its payment reference are committed
/// together, or not at all. Completion is idempotent; only the confirmation that actually completes an order
/// publishes an [`OrderCompletedEvent`], which the settlement hook picks up in the background.
pub struct OrderFlowApi<B, G> {
    db: B,
    gateway: G,
    producers: EventProducers,
    split: RevenueSplit,
}

impl<B, G> Debug for OrderFlowApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi ({}% platform share)", self.split.platform_percent())
    }
}

impl<B, G> OrderFlowApi<B, G> {
    pub fn new(db: B, gateway: G, producers: EventProducers) -> Self {
        Self { db, gateway, producers, split: RevenueSplit::default() }
    }

    pub fn with_revenue_split(mut self, split: RevenueSplit) -> Self {
        self.split = split;
        self
    }

    pub fn revenue_split(&self) -> RevenueSplit {
        self.split
    }

    pub fn db(&self) -> &B {
        &self.db
    }
}

impl<B, G> OrderFlowApi<B, G>
where
    B: AmbassadorDatabase,
    G: CheckoutGateway,
{
    /// Looks up the referral link for `code`. Blank codes are never valid.
    pub async fn resolve_link(&self, code: &str) -> Result<ReferralLink, OrderFlowError> {
        let code = non_blank(code).ok_or_else(|| OrderFlowError::LinkNotFound(code.to_string()))?;
        let link =
            self.db.fetch_link_by_code(code).await?.ok_or_else(|| OrderFlowError::LinkNotFound(code.to_string()))?;
        trace!("🔄️🔗️ Code {code} belongs to ambassador #{}", link.user_id);
        Ok(link)
    }

    /// Prices every requested product at its current catalog price and splits each line between the platform and the
    /// ambassador. Nothing is written.
    ///
    /// Fails with `InvalidRequest` if the product list is empty, a quantity is not positive, the customer has no
    /// e-mail address or a line or order total overflows; and with `InvalidProduct` for an unknown product.
    pub async fn assemble_order(
        &self,
        link: &ReferralLink,
        request: NewOrderRequest,
    ) -> Result<AssembledOrder, OrderFlowError> {
        if request.products.is_empty() {
            return Err(OrderFlowError::InvalidRequest("An order must contain at least one product".into()));
        }
        if non_blank(&request.customer.email).is_none() {
            return Err(OrderFlowError::InvalidRequest("A customer e-mail address is required".into()));
        }
        let mut items = Vec::with_capacity(request.products.len());
        let mut checkout_items = Vec::with_capacity(request.products.len());
        let mut order_total = Cents::default();
        for line in &request.products {
            if line.quantity <= 0 {
                return Err(OrderFlowError::InvalidRequest(format!(
                    "Quantity for product #{} must be positive, but was {}",
                    line.product_id, line.quantity
                )));
            }
            let product =
                self.db.fetch_product(line.product_id).await?.ok_or(OrderFlowError::InvalidProduct(line.product_id))?;
            let line_total = product.price.checked_mul(line.quantity).ok_or_else(|| {
                OrderFlowError::InvalidRequest(format!("The total for product #{} is too large", product.id))
            })?;
            order_total = order_total
                .checked_add(line_total)
                .ok_or_else(|| OrderFlowError::InvalidRequest("The order total is too large".into()))?;
            let (platform_revenue, ambassador_revenue) = self.split.split(line_total);
            trace!(
                "🔄️🧾️ {} x {} @ {} = {line_total} ({platform_revenue} platform, {ambassador_revenue} ambassador)",
                line.quantity,
                product.title,
                product.price
            );
            items.push(NewOrderItem {
                product_title: product.title.clone(),
                unit_price: product.price,
                quantity: line.quantity,
                platform_revenue,
                ambassador_revenue,
            });
            checkout_items.push(CheckoutLineItem {
                title: product.title,
                description: product.description,
                image: product.image,
                unit_price: product.price,
                quantity: line.quantity,
            });
        }
        let order = NewOrder {
            ambassador_id: link.user_id,
            code: link.code.clone(),
            ambassador_email: link.owner_email.clone(),
            customer: request.customer,
            items,
        };
        Ok(AssembledOrder { order, checkout_items })
    }

    /// Resolves the link, assembles the order, then stores it and opens its payment session in one transaction.
    ///
    /// If the payment gateway fails, nothing is stored.
    pub async fn create_order(&self, request: NewOrderRequest) -> Result<OrderCreated, OrderFlowError> {
        let link = self.resolve_link(&request.code).await?;
        let AssembledOrder { order, checkout_items } = self.assemble_order(&link, request).await?;
        let gateway = &self.gateway;
        let items = checkout_items.as_slice();
        let (order, session) = self
            .db
            .create_order_with_checkout(order, |order: Order| async move {
                gateway.create_checkout_session(&order, items).await
            })
            .await?;
        info!(
            "🔄️📦️ Order #{} for {} created via link {}. Payment reference: {}",
            order.id,
            order.total(),
            order.code,
            session.id
        );
        Ok(OrderCreated { order, session })
    }

    /// Handles a payment confirmation.
    ///
    /// Only the call that moves the order into the completed state publishes the completion event. Repeated or
    /// concurrent confirmations for the same reference return [`CompletionResult::AlreadyCompleted`] and have no side
    /// effects. An unknown reference fails with `OrderNotFound` and changes nothing.
    pub async fn complete_order(&self, payment_reference: &str) -> Result<CompletionResult, OrderFlowError> {
        let reference = non_blank(payment_reference)
            .ok_or_else(|| OrderFlowError::OrderNotFound(payment_reference.to_string()))?;
        let result = self.db.complete_order_by_payment_reference(reference).await?;
        match &result {
            CompletionResult::Completed(order) => {
                info!("🔄️✅️ Order #{} ({reference}) is complete. Dispatching settlement.", order.id);
                self.producers.publish_order_completed(OrderCompletedEvent::new(order.clone()));
            },
            CompletionResult::AlreadyCompleted(order) => {
                info!("🔄️✅️ Order #{} ({reference}) was already complete. Ignoring the duplicate confirmation.", order.id);
            },
        }
        Ok(result)
    }

    pub async fn fetch_orders(&self) -> Result<Vec<Order>, OrderFlowError> {
        let orders = self.db.fetch_orders().await?;
        Ok(orders)
    }

    pub async fn fetch_order_by_payment_reference(&self, reference: &str) -> Result<Option<Order>, OrderFlowError> {
        match non_blank(reference) {
            Some(reference) => Ok(self.db.fetch_order_by_payment_reference(reference).await?),
            None => Ok(None),
        }
    }
}
