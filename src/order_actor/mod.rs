//! # Order Actor
//!
//! Orders are created by checking out a cart and then move through the
//! kitchen workflow. The actor depends on the cart and menu actors, injected
//! as its `Context` when it is started:
//!
//! ```rust,ignore
//! let (order_actor, orders) = order_actor::new(32);
//! tokio::spawn(order_actor.run((cart_client.clone(), menu_client.clone())));
//!
//! let order_id = orders.checkout(cart_id, OrderType::DineIn).await?;
//! orders.advance(order_id).await?;
//! ```
//!
//! Neither dependency calls back into the order actor, so dropping the
//! clients shuts all three down cleanly.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::OrderClient;
use crate::framework::ResourceActor;
use crate::model::Order;

/// Creates a new Order actor and its client.
pub fn new(mailbox: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox);
    (actor, OrderClient::new(generic_client))
}
