//! # ActorEntity Trait
//!
//! The contract every resource (menu item, cart session, order) implements to be
//! managed by the generic [`ResourceActor`](crate::framework::ResourceActor).
//!
//! Associated types pin down the id, the DTOs, the custom actions and the error
//! type, so a `MenuItemCreate` payload can never reach the cart actor.
//!
//! # Provided Methods (Hooks)
//! - [`ActorEntity::on_create`]
//! - [`ActorEntity::on_delete`]
//!
//! Both default to `Ok(())`.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can talk to other actors (the order actor reads the
/// cart and the menu while it is being created). The `Context` is handed to
/// `run()`, not `new()`, so actors can be wired after they are all constructed.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier. Ordered so listings come back in creation order, and
    /// convertible from the actor's sequential `u32` counter.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to create a new instance.
    type Create: Send + Sync + Debug;

    /// Payload used to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. `AddItem` on a cart).
    type Action: Send + Sync + Debug;

    /// Result of a custom action.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()`. Use `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per actor rather than per message.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the entity from its id and creation payload.
    /// Called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Called after construction, before the entity is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
