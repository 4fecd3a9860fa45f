use std::future::Future;

use crate::{
    db_types::{CompletionResult, NewOrder, Order},
    traits::{CheckoutGatewayError, CheckoutSession, StoreError},
};

/// The transactional order store.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Persists a new order and opens its payment session in a single atomic transaction:
    ///
    /// 1. The order header is inserted, followed by each line item.
    /// 2. `open_session` is called with the (uncommitted) order, including its id and items.
    /// 3. The returned session id is attached to the order as its payment reference.
    /// 4. The transaction is committed.
    ///
    /// If any step fails, including the checkout call, the transaction is rolled back and no trace of the order
    /// remains. A gateway failure is reported as [`StoreError::CheckoutFailed`].
    async fn create_order_with_checkout<F, Fut>(
        &self,
        order: NewOrder,
        open_session: F,
    ) -> Result<(Order, CheckoutSession), StoreError>
    where
        F: FnOnce(Order) -> Fut,
        Fut: Future<Output = Result<CheckoutSession, CheckoutGatewayError>>;

    /// Loads the order (and its line items) with the given payment reference.
    async fn fetch_order_by_payment_reference(&self, reference: &str) -> Result<Option<Order>, StoreError>;

    /// Loads the order (and its line items) with the given id.
    async fn fetch_order_by_id(&self, id: i64) -> Result<Option<Order>, StoreError>;

    /// Marks the order as completed.
    ///
    /// The check and the update happen in one conditional write, so if several callers race, exactly one of them
    /// receives `true`. Subsequent calls are harmless and return `false`.
    async fn finalize_order(&self, order_id: i64) -> Result<bool, StoreError>;

    /// Looks up the order for `reference` and finalizes it. The result tells the caller whether it won the completion
    /// (and must therefore run settlement) or whether the order was already complete.
    ///
    /// Returns [`StoreError::PaymentReferenceNotFound`] if no order matches, without changing any state.
    async fn complete_order_by_payment_reference(&self, reference: &str) -> Result<CompletionResult, StoreError>;

    /// Fetches every order, with line items, in ascending id order.
    async fn fetch_orders(&self) -> Result<Vec<Order>, StoreError>;
}
