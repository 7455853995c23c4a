//! # Persistence
//!
//! A minimal key/value capability the cart and menu are saved through, two
//! backends for it, and the stores binding a backend to each JSON format:
//! [`CartStore`] for carts and [`MenuStore`] for the admin menu.
//!
//! Backends are synchronous. The cart actor writes once at the end of every
//! mutation, while it still owns the cart, so writes for one cart never
//! interleave.

pub mod cart_store;
pub mod error;
pub mod file;
pub mod memory;
pub mod menu_store;

pub use cart_store::CartStore;
pub use error::StorageError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use menu_store::MenuStore;

/// Raw string storage keyed by name.
pub trait KeyValueStore: Send + Sync {
    /// Returns the stored value, or `None` if nothing is stored under `key`.
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
