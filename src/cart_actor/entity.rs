//! [`ActorEntity`] implementation for [`CartSession`].
//!
//! A session owns one [`Cart`] and the storage key it is persisted under.
//! Restoring happens in `on_create`; every mutating action writes the cart
//! back before replying.

use super::actions::{CartAction, CartActionResult, CartSnapshot};
use super::error::CartError;
use super::notifier::Notifier;
use crate::framework::ActorEntity;
use crate::model::{AddOutcome, Cart, CartId};
use crate::storage::CartStore;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

/// One customer's cart as seen by the actor system.
#[derive(Debug, Clone)]
pub struct CartSession {
    pub id: CartId,
    pub storage_key: String,
    pub cart: Cart,
    notifier: Notifier,
}

impl CartSession {
    pub fn is_notifying(&self) -> bool {
        self.notifier.is_active()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            lines: self.cart.lines().to_vec(),
            total_price: self.cart.total_price(),
            total_items: self.cart.total_items(),
            notifying: self.is_notifying(),
        }
    }
}

/// Payload for opening a cart session.
#[derive(Debug, Clone)]
pub struct CartOpen {
    /// Key the cart is restored from and saved under.
    pub storage_key: String,
    /// How long the "item added" flag stays on.
    pub notify_after: Duration,
}

#[async_trait]
impl ActorEntity for CartSession {
    type Id = CartId;
    type Create = CartOpen;
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = CartStore;
    type Error = CartError;

    fn from_create_params(id: CartId, params: CartOpen) -> Result<Self, CartError> {
        if params.storage_key.trim().is_empty() {
            return Err(CartError::InvalidKey(params.storage_key));
        }
        Ok(Self {
            id,
            storage_key: params.storage_key,
            cart: Cart::new(),
            notifier: Notifier::new(params.notify_after),
        })
    }

    /// Restores whatever was last saved under the session's key.
    async fn on_create(&mut self, store: &CartStore) -> Result<(), CartError> {
        self.cart = store.load(&self.storage_key);
        info!(cart_id = %self.id, key = %self.storage_key, lines = self.cart.len(), "Cart opened");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _store: &CartStore) -> Result<(), CartError> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        store: &CartStore,
    ) -> Result<CartActionResult, CartError> {
        let result = match action {
            CartAction::Snapshot => return Ok(CartActionResult::Snapshot(self.snapshot())),
            CartAction::Add { item, spice_level } => {
                let outcome = self.cart.add_item(&item, spice_level);
                match outcome {
                    AddOutcome::Appended => {
                        debug!(item_id = %item.id, %spice_level, "Line appended")
                    }
                    AddOutcome::Incremented { quantity } => {
                        debug!(item_id = %item.id, %spice_level, quantity, "Line incremented")
                    }
                }
                self.notifier.pulse();
                CartActionResult::Add(outcome)
            }
            CartAction::Remove(id) => CartActionResult::Remove(self.cart.remove_item(id)),
            CartAction::UpdateQuantity { id, quantity } => {
                CartActionResult::UpdateQuantity(self.cart.set_quantity(id, quantity))
            }
            CartAction::UpdateSpiceLevel { id, from, to } => {
                let change = self.cart.change_spice_level(id, from, to);
                debug!(item_id = %id, %from, %to, ?change, "Spice level change");
                CartActionResult::UpdateSpiceLevel(change)
            }
            CartAction::Clear => {
                self.cart.clear();
                CartActionResult::Clear(())
            }
            CartAction::Checkout { expected } => {
                if self.cart.lines() != expected.as_slice() {
                    debug!(cart_id = %self.id, "Cart changed since it was read");
                    return Err(CartError::Changed(self.id.to_string()));
                }
                let taken = self.snapshot();
                self.cart.clear();
                CartActionResult::Checkout(taken)
            }
        };
        store.save(&self.storage_key, &self.cart);
        Ok(result)
    }
}
