//! Custom actions for the Cart actor.
//!
//! Every mutation of a cart goes through [`CartAction`] so it runs inside the
//! actor that owns the session. See
//! [`CartSession::handle_action`](crate::framework::ActorEntity::handle_action).

use crate::model::{AddOutcome, CartLineItem, MenuItem, MenuItemId, SpiceChange, SpiceLevel};

/// Operations on one cart session.
#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds one unit of `item` at `spice_level`.
    Add {
        item: MenuItem,
        spice_level: SpiceLevel,
    },
    /// Removes every line for the item, across spice levels.
    Remove(MenuItemId),
    /// Sets the quantity of every line for the item; `<= 0` removes them.
    UpdateQuantity { id: MenuItemId, quantity: i64 },
    /// Moves the `(id, from)` line to `to`, merging on collision.
    UpdateSpiceLevel {
        id: MenuItemId,
        from: SpiceLevel,
        to: SpiceLevel,
    },
    Clear,
    /// Reads lines, totals and the notification flag in one round trip.
    Snapshot,
    /// Hands the lines over and empties the cart, but only if the cart still
    /// holds exactly `expected`. Fails with [`CartError::Changed`] otherwise.
    ///
    /// [`CartError::Changed`]: super::CartError::Changed
    Checkout { expected: Vec<CartLineItem> },
}

/// Results from CartActions - variants match 1:1 with CartAction
#[derive(Debug, Clone)]
pub enum CartActionResult {
    Add(AddOutcome),
    /// Number of lines removed.
    Remove(usize),
    /// Number of lines touched (or removed, for quantities `<= 0`).
    UpdateQuantity(usize),
    UpdateSpiceLevel(SpiceChange),
    Clear(()),
    Snapshot(CartSnapshot),
    /// What the cart held when it was emptied.
    Checkout(CartSnapshot),
}

/// A consistent read of a cart at one point in its history.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLineItem>,
    pub total_price: f64,
    pub total_items: u64,
    pub notifying: bool,
}
