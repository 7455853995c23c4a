//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Semantically invalid configuration values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("storage.cart_key must not be empty")]
    EmptyCartKey,

    #[error("storage.menu_key must not be empty")]
    EmptyMenuKey,

    #[error("storage.path must not be empty for the file backend")]
    EmptyStoragePath,

    #[error("actors.mailbox must be at least 1")]
    ZeroMailbox,

    #[error("cart.notify_millis must be at least 1")]
    ZeroNotifyDuration,
}
