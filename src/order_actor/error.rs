//! Error types for the Order actor.

use crate::cart_actor::CartError;
use crate::menu_actor::MenuError;
use crate::model::{MenuItemId, OrderStatus};
use thiserror::Error;

/// Errors that can occur during checkout and order tracking.
///
/// Failures of the cart and menu actors consulted at checkout are wrapped
/// unchanged.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Checkout was attempted on a cart with no lines.
    #[error("Cart {0} is empty")]
    EmptyCart(String),

    /// A cart line refers to a dish no longer on the menu.
    #[error("Menu item {0} is no longer available")]
    UnavailableItem(MenuItemId),

    /// The order cannot move past its current status.
    #[error("Order cannot advance past {0}")]
    InvalidTransition(OrderStatus),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Menu(#[from] MenuError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
