//! Application configuration
//!
//! Values come from built-in defaults, an optional `kavya.toml` (or any other
//! format the `config` crate recognises under the name `kavya`) in the working
//! directory, and environment variables with the `KAVYA` prefix. `.env` is
//! loaded first when present.
//!
//! - `KAVYA__STORAGE__BACKEND=file` -> `storage.backend = "file"`
//! - `KAVYA__CART__NOTIFY_MILLIS=300` -> `cart.notify_millis = 300`
//!
//! ```no_run
//! use kavya_cart::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;

pub use error::{ConfigError, ValidationError};

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub cart: CartConfig,
    #[serde(default)]
    pub actors: ActorConfig,
}

/// Where carts and the menu are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process memory; nothing survives a restart.
    #[default]
    Memory,
    /// One JSON file per key under `storage.path`.
    File,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
    /// Key the default cart is stored under.
    pub cart_key: String,
    /// Key the admin menu is stored under.
    pub menu_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            path: PathBuf::from(".kavya"),
            cart_key: "cart".to_string(),
            menu_key: "adminMenu".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// How long the "item added" flag stays on.
    pub notify_millis: u64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self { notify_millis: 600 }
    }
}

impl CartConfig {
    pub fn notify_after(&self) -> Duration {
        Duration::from_millis(self.notify_millis)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    /// Mailbox capacity of each actor.
    pub mailbox: usize,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self { mailbox: 32 }
    }
}

impl AppConfig {
    /// Load configuration from `kavya.*` and the environment
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is unreadable or a value has the
    /// wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(config::File::with_name("kavya").required(false))
            .add_source(config::Environment::default().prefix("KAVYA").separator("__"))
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.storage.cart_key.trim().is_empty() {
            return Err(ValidationError::EmptyCartKey);
        }
        if self.storage.menu_key.trim().is_empty() {
            return Err(ValidationError::EmptyMenuKey);
        }
        if self.storage.backend == StorageBackend::File
            && self.storage.path.as_os_str().is_empty()
        {
            return Err(ValidationError::EmptyStoragePath);
        }
        if self.actors.mailbox == 0 {
            return Err(ValidationError::ZeroMailbox);
        }
        if self.cart.notify_millis == 0 {
            return Err(ValidationError::ZeroNotifyDuration);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("KAVYA__STORAGE__BACKEND");
        env::remove_var("KAVYA__STORAGE__CART_KEY");
        env::remove_var("KAVYA__STORAGE__MENU_KEY");
        env::remove_var("KAVYA__CART__NOTIFY_MILLIS");
        env::remove_var("KAVYA__ACTORS__MAILBOX");
    }

    #[test]
    fn defaults_match_the_storefront() {
        let config = AppConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.cart_key, "cart");
        assert_eq!(config.storage.menu_key, "adminMenu");
        assert_eq!(config.cart.notify_after(), Duration::from_millis(600));
        assert_eq!(config.actors.mailbox, 32);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn environment_overrides_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("KAVYA__STORAGE__BACKEND", "file");
        env::set_var("KAVYA__STORAGE__CART_KEY", "table-7");
        env::set_var("KAVYA__STORAGE__MENU_KEY", "menu-v2");
        env::set_var("KAVYA__CART__NOTIFY_MILLIS", "250");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert_eq!(config.storage.cart_key, "table-7");
        assert_eq!(config.storage.menu_key, "menu-v2");
        assert_eq!(config.cart.notify_millis, 250);
        assert_eq!(config.actors.mailbox, 32);
    }

    #[test]
    fn unparsable_value_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("KAVYA__ACTORS__MAILBOX", "lots");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }

    #[test]
    fn validate_rejects_unusable_values() {
        let mut config = AppConfig::default();
        config.storage.cart_key = " ".to_string();
        assert_eq!(config.validate(), Err(ValidationError::EmptyCartKey));

        let mut config = AppConfig::default();
        config.storage.menu_key = String::new();
        assert_eq!(config.validate(), Err(ValidationError::EmptyMenuKey));

        let mut config = AppConfig::default();
        config.actors.mailbox = 0;
        assert_eq!(config.validate(), Err(ValidationError::ZeroMailbox));

        let mut config = AppConfig::default();
        config.cart.notify_millis = 0;
        assert_eq!(config.validate(), Err(ValidationError::ZeroNotifyDuration));

        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::File;
        config.storage.path = PathBuf::new();
        assert_eq!(config.validate(), Err(ValidationError::EmptyStoragePath));
    }
}
