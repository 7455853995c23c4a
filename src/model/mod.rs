//! Storefront data types: menu items, cart lines and orders.
//!
//! [`Cart`] is the aggregation engine itself. It is plain data plus pure
//! methods; the actors in [`cart_actor`](crate::cart_actor) and
//! [`order_actor`](crate::order_actor) own instances of it.

pub mod cart;
pub mod menu;
pub mod order;

pub use cart::*;
pub use menu::*;
pub use order::*;
