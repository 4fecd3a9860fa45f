use ambassador_engine::{
    db_types::Order,
    traits::{CheckoutGateway, CheckoutGatewayError, CheckoutLineItem, CheckoutSession},
};
use mockall::mock;

mock! {
    pub Gateway {}
    impl CheckoutGateway for Gateway {
        async fn create_checkout_session(&self, order: &Order, items: &[CheckoutLineItem]) -> Result<CheckoutSession, CheckoutGatewayError>;
    }
}

/// A gateway that must be called exactly once and hands out session `id`.
pub fn gateway_returning(id: &'static str) -> MockGateway {
    let mut gateway = MockGateway::new();
    gateway.expect_create_checkout_session().times(1).returning(move |_, _| {
        Ok(CheckoutSession { id: id.to_string(), url: Some(format!("https://checkout.stripe.com/c/pay/{id}")) })
    });
    gateway
}

/// A gateway that must never be called.
pub fn unused_gateway() -> MockGateway {
    let mut gateway = MockGateway::new();
    gateway.expect_create_checkout_session().never();
    gateway
}
