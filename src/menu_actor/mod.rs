//! # Menu Actor
//!
//! The catalog the admin console manages and the storefront browses. The cart
//! never talks to this actor; callers look items up here and hand them to the
//! cart. The order actor reads it at checkout to make sure every ordered dish
//! is still on the menu.
//!
//! Plain CRUD: [`MenuItem`](crate::model::MenuItem) has no custom actions.
//! Every accepted write is flushed to the
//! [`MenuStore`](crate::storage::MenuStore) the actor runs with.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::MenuClient;
use crate::framework::ResourceActor;
use crate::model::MenuItem;

/// Creates a new Menu actor and its client.
pub fn new(mailbox: usize) -> (ResourceActor<MenuItem>, MenuClient) {
    let (actor, generic_client) = ResourceActor::new(mailbox);
    (actor, MenuClient::new(generic_client))
}
