use serde::{Deserialize, Serialize};

use crate::db_types::Order;

/// Published exactly once per order, by the confirmation that moved it into the `Completed` state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCompletedEvent {
    pub order: Order,
}

impl OrderCompletedEvent {
    pub fn new(order: Order) -> Self {
        Self { order }
    }
}
