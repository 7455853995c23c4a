//! Custom actions for the Order actor.

use crate::model::OrderStatus;

/// Kitchen-side operations on an order.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves the order one step along Pending → Preparing → Served.
    Advance,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone)]
pub enum OrderActionResult {
    /// The status the order moved to.
    Advance(OrderStatus),
}
