//! # Cart Client
//!
//! The public face of the cart aggregation engine. Every mutation is sent to
//! the cart actor as a [`CartAction`]; reads clone the session.

use crate::cart_actor::{
    CartAction, CartActionResult, CartError, CartOpen, CartSession, CartSnapshot,
};
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::model::{
    AddOutcome, CartId, CartLineItem, MenuItem, MenuItemId, SpiceChange, SpiceLevel,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartSession>,
    notify_after: Duration,
}

#[async_trait]
impl ActorClient<CartSession> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<CartSession> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> CartError {
        match e {
            FrameworkError::NotFound(id) => CartError::NotFound(id),
            other => other
                .downcast_entity::<CartError>()
                .unwrap_or_else(|e| CartError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartSession>, notify_after: Duration) -> Self {
        Self { inner, notify_after }
    }

    /// Opens a session restored from whatever is stored under `storage_key`.
    #[instrument(skip(self, storage_key), fields(key = tracing::field::Empty))]
    pub async fn open_cart(&self, storage_key: impl Into<String>) -> Result<CartId, CartError> {
        let storage_key = storage_key.into();
        tracing::Span::current().record("key", storage_key.as_str());
        debug!("Sending request");
        self.inner
            .create(CartOpen {
                storage_key,
                notify_after: self.notify_after,
            })
            .await
            .map_err(Self::map_error)
    }

    async fn act(&self, cart: CartId, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner
            .perform_action(cart, action)
            .await
            .map_err(Self::map_error)
    }

    async fn session(&self, cart: CartId) -> Result<CartSession, CartError> {
        self.inner
            .get(cart)
            .await
            .map_err(Self::map_error)?
            .ok_or_else(|| CartError::NotFound(cart.to_string()))
    }

    /// Adds one unit of `item`. `spice_level` defaults to medium.
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn add_to_cart(
        &self,
        cart: CartId,
        item: &MenuItem,
        spice_level: Option<SpiceLevel>,
    ) -> Result<AddOutcome, CartError> {
        let action = CartAction::Add {
            item: item.clone(),
            spice_level: spice_level.unwrap_or_default(),
        };
        match self.act(cart, action).await? {
            CartActionResult::Add(outcome) => Ok(outcome),
            _ => unreachable!("Add action must return Add result"),
        }
    }

    /// Removes every spice variant of `item_id`. Returns how many lines went.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(
        &self,
        cart: CartId,
        item_id: MenuItemId,
    ) -> Result<usize, CartError> {
        match self.act(cart, CartAction::Remove(item_id)).await? {
            CartActionResult::Remove(removed) => Ok(removed),
            _ => unreachable!("Remove action must return Remove result"),
        }
    }

    /// Sets the quantity of every line for `item_id`; zero or less removes them.
    #[instrument(skip(self))]
    pub async fn update_quantity(
        &self,
        cart: CartId,
        item_id: MenuItemId,
        quantity: i64,
    ) -> Result<usize, CartError> {
        let action = CartAction::UpdateQuantity {
            id: item_id,
            quantity,
        };
        match self.act(cart, action).await? {
            CartActionResult::UpdateQuantity(touched) => Ok(touched),
            _ => unreachable!("UpdateQuantity action must return UpdateQuantity result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn update_spice_level(
        &self,
        cart: CartId,
        item_id: MenuItemId,
        current: SpiceLevel,
        new: SpiceLevel,
    ) -> Result<SpiceChange, CartError> {
        let action = CartAction::UpdateSpiceLevel {
            id: item_id,
            from: current,
            to: new,
        };
        match self.act(cart, action).await? {
            CartActionResult::UpdateSpiceLevel(change) => Ok(change),
            _ => unreachable!("UpdateSpiceLevel action must return UpdateSpiceLevel result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn clear_cart(&self, cart: CartId) -> Result<(), CartError> {
        match self.act(cart, CartAction::Clear).await? {
            CartActionResult::Clear(()) => Ok(()),
            _ => unreachable!("Clear action must return Clear result"),
        }
    }

    #[instrument(skip(self))]
    pub async fn snapshot(&self, cart: CartId) -> Result<CartSnapshot, CartError> {
        match self.act(cart, CartAction::Snapshot).await? {
            CartActionResult::Snapshot(snapshot) => Ok(snapshot),
            _ => unreachable!("Snapshot action must return Snapshot result"),
        }
    }

    /// Empties the cart and returns what it held, provided it still holds
    /// exactly `expected`. Otherwise fails with [`CartError::Changed`] and
    /// leaves the cart alone.
    #[instrument(skip(self, expected), fields(lines = expected.len()))]
    pub async fn take_for_checkout(
        &self,
        cart: CartId,
        expected: Vec<CartLineItem>,
    ) -> Result<CartSnapshot, CartError> {
        match self.act(cart, CartAction::Checkout { expected }).await? {
            CartActionResult::Checkout(taken) => Ok(taken),
            _ => unreachable!("Checkout action must return Checkout result"),
        }
    }

    pub async fn items(&self, cart: CartId) -> Result<Vec<CartLineItem>, CartError> {
        Ok(self.session(cart).await?.cart.lines().to_vec())
    }

    pub async fn total_price(&self, cart: CartId) -> Result<f64, CartError> {
        Ok(self.session(cart).await?.cart.total_price())
    }

    pub async fn total_items(&self, cart: CartId) -> Result<u64, CartError> {
        Ok(self.session(cart).await?.cart.total_items())
    }

    pub async fn is_notifying(&self, cart: CartId) -> Result<bool, CartError> {
        Ok(self.session(cart).await?.is_notifying())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action};
    use crate::framework::ResourceRequest;
    use tokio::sync::mpsc;

    fn client() -> (CartClient, mpsc::Receiver<ResourceRequest<CartSession>>) {
        let (inner, receiver) = create_mock_client::<CartSession>(8);
        (CartClient::new(inner, Duration::from_millis(600)), receiver)
    }

    #[tokio::test]
    async fn add_defaults_to_medium() {
        let (carts, mut receiver) = client();
        let item = MenuItem::new(MenuItemId(9), "Masala Dosa", 120.0, "Main Course");

        let task = tokio::spawn(async move { carts.add_to_cart(CartId(1), &item, None).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, CartId(1));
        match action {
            CartAction::Add { spice_level, .. } => assert_eq!(spice_level, SpiceLevel::Medium),
            other => panic!("Expected Add action, got {other:?}"),
        }
        responder
            .send(Ok(CartActionResult::Add(AddOutcome::Appended)))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), AddOutcome::Appended);
    }

    #[tokio::test]
    async fn unknown_cart_maps_to_not_found() {
        let (carts, mut receiver) = client();
        let task = tokio::spawn(async move { carts.clear_cart(CartId(3)).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::NotFound("cart_3".to_string())))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(CartError::NotFound("cart_3".to_string()))
        );
    }

    #[tokio::test]
    async fn closed_actor_is_a_communication_error() {
        let (carts, receiver) = client();
        drop(receiver);

        let err = carts.snapshot(CartId(1)).await.unwrap_err();
        assert!(matches!(err, CartError::ActorCommunicationError(_)));
    }
}
