use crate::model::{CartId, CartLineItem};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Kitchen progress of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Served,
}

impl OrderStatus {
    /// The next step in the kitchen workflow, if any.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Served),
            OrderStatus::Served => None,
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

/// Whether the customer eats in or takes the food away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderType {
    #[default]
    #[serde(rename = "Dine-In")]
    DineIn,
    Takeaway,
}

/// Represents a placed order.
///
/// # Actor Framework
/// Implements [`ActorEntity`](crate::framework::ActorEntity) in
/// [`order_actor::entity`](crate::order_actor::entity). Orders are created from
/// a cart at checkout; see [`OrderCreate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub cart_id: CartId,
    pub order_type: OrderType,
    pub lines: Vec<CartLineItem>,
    pub total: f64,
    pub item_count: u64,
    pub status: OrderStatus,
}

impl Order {
    /// Creates an order with no lines yet. Lines and totals are filled in from
    /// the cart during checkout.
    pub fn new(id: OrderId, cart_id: CartId, order_type: OrderType) -> Self {
        Self {
            id,
            cart_id,
            order_type,
            lines: Vec::new(),
            total: 0.0,
            item_count: 0,
            status: OrderStatus::Pending,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != OrderStatus::Served
    }
}

/// Payload for checking out a cart.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub cart_id: CartId,
    pub order_type: OrderType,
}

/// Admin override of an order's status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
}

/// Aggregates shown on the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub total_revenue: f64,
    pub active_orders: usize,
    pub completed_orders: usize,
}

impl DashboardStats {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders
            .into_iter()
            .fold(DashboardStats::default(), |mut stats, order| {
                stats.total_orders += 1;
                stats.total_revenue += order.total;
                if order.is_active() {
                    stats.active_orders += 1;
                } else {
                    stats.completed_orders += 1;
                }
                stats
            })
    }
}
