use super::{KeyValueStore, StorageError};
use crate::model::Cart;
use std::sync::Arc;
use tracing::{debug, warn};

/// Loads and saves carts as the storefront's JSON array of lines.
///
/// Neither direction surfaces an error to the cart: a missing or unreadable
/// cart loads as empty, and a failed save is logged and dropped.
#[derive(Clone)]
pub struct CartStore {
    backend: Arc<dyn KeyValueStore>,
}

impl CartStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Restores the cart stored under `key`, or an empty cart.
    pub fn load(&self, key: &str) -> Cart {
        match self.try_load(key) {
            Ok(Some(cart)) => {
                debug!(key, lines = cart.len(), "Restored cart");
                cart
            }
            Ok(None) => {
                debug!(key, "No stored cart");
                Cart::new()
            }
            Err(e) => {
                warn!(key, error = %e, "Discarding unreadable cart");
                Cart::new()
            }
        }
    }

    /// Writes `cart` under `key`. Failures are logged, never returned.
    pub fn save(&self, key: &str, cart: &Cart) {
        if let Err(e) = self.try_save(key, cart) {
            warn!(key, error = %e, "Cart not persisted");
        }
    }

    fn try_load(&self, key: &str) -> Result<Option<Cart>, StorageError> {
        let Some(raw) = self.backend.load(key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn try_save(&self, key: &str, cart: &Cart) -> Result<(), StorageError> {
        let raw = serde_json::to_string(cart)?;
        self.backend.save(key, &raw)
    }
}
