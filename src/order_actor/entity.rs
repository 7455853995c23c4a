//! [`ActorEntity`] implementation for [`Order`].
//!
//! Checkout happens in `on_create`: the order reads the cart, checks the menu,
//! then asks the cart actor to hand over exactly the lines it checked. If the
//! cart changed in between, the whole read is repeated. If any step fails the
//! order is never stored and the cart keeps its lines.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::cart_actor::CartError;
use crate::clients::{CartClient, MenuClient};
use crate::framework::{ActorClient, ActorEntity};
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};
use async_trait::async_trait;
use tracing::{debug, info, warn};

/// How often checkout rereads a cart that keeps changing under it.
const CHECKOUT_ATTEMPTS: usize = 3;

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = (CartClient, MenuClient);
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, OrderError> {
        Ok(Self::new(id, params.cart_id, params.order_type))
    }

    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), OrderError> {
        let (carts, menu) = ctx;

        let mut attempt = 1;
        let taken = loop {
            let snapshot = carts.snapshot(self.cart_id).await?;
            if snapshot.lines.is_empty() {
                return Err(OrderError::EmptyCart(self.cart_id.to_string()));
            }

            for line in &snapshot.lines {
                debug!(item_id = %line.id, "Checking menu");
                if menu.get(line.id).await?.is_none() {
                    return Err(OrderError::UnavailableItem(line.id));
                }
            }

            match carts.take_for_checkout(self.cart_id, snapshot.lines).await {
                Ok(taken) => break taken,
                Err(CartError::Changed(cart)) if attempt < CHECKOUT_ATTEMPTS => {
                    warn!(%cart, attempt, "Cart changed during checkout, reading it again");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };

        self.total = taken.total_price;
        self.item_count = taken.total_items;
        self.lines = taken.lines;
        info!(order_id = %self.id, total = self.total, items = self.item_count, "Checked out");
        Ok(())
    }

    /// Admin override: sets the status directly, in either direction.
    async fn on_update(
        &mut self,
        update: OrderUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), OrderError> {
        if let Some(status) = update.status {
            self.status = status;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &Self::Context,
    ) -> Result<OrderActionResult, OrderError> {
        match action {
            OrderAction::Advance => {
                let next = self
                    .status
                    .next()
                    .ok_or(OrderError::InvalidTransition(self.status))?;
                self.status = next;
                Ok(OrderActionResult::Advance(next))
            }
        }
    }
}
