//! Error types for the Cart actor.

use thiserror::Error;

/// Errors a cart caller can see.
///
/// Cart operations themselves never fail: unknown items and spice levels are
/// no-ops. What remains is addressing a session that does not exist, opening
/// one under an unusable key, a checkout racing a change, and the actor
/// plumbing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart not found: {0}")]
    NotFound(String),

    /// The cart moved on since it was last read; nothing was taken.
    #[error("Cart {0} changed during checkout")]
    Changed(String),

    #[error("Invalid cart storage key: {0:?}")]
    InvalidKey(String),

    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
