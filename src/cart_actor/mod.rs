//! # Cart Actor
//!
//! Owns every open [`CartSession`]. Each session wraps the aggregation engine
//! ([`Cart`](crate::model::Cart)), the key it is persisted under and the
//! "item added" [`Notifier`].
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`CartSession`]
//! - [`actions`] - [`CartAction`] / [`CartActionResult`], one variant per cart operation
//! - [`error`] - [`CartError`]
//! - [`notifier`] - the self-resetting notification flag
//!
//! ## Usage
//!
//! ```rust,ignore
//! let (actor, carts) = cart_actor::new(32, Duration::from_millis(600));
//! tokio::spawn(actor.run(CartStore::new(Arc::new(MemoryStore::new()))));
//!
//! let cart = carts.open_cart("cart").await?;
//! carts.add_to_cart(cart, &paneer_tikka, Some(SpiceLevel::Hot)).await?;
//! assert_eq!(carts.total_items(cart).await?, 1);
//! ```
//!
//! Requests for one actor are processed one at a time, so mutations of a cart
//! never overlap and the cart needs no lock.

pub mod actions;
pub mod entity;
pub mod error;
pub mod notifier;

pub use actions::*;
pub use entity::*;
pub use error::*;
pub use notifier::Notifier;

use crate::clients::CartClient;
use crate::framework::ResourceActor;
use std::time::Duration;

/// Creates a new Cart actor and its client.
///
/// Sessions opened through the returned client keep their notification flag
/// on for `notify_after` after each add.
pub fn new(mailbox: usize, notify_after: Duration) -> (ResourceActor<CartSession>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox);
    (actor, CartClient::new(generic_client, notify_after))
}
