use crate::cart_actor::{self, CartError};
use crate::clients::{CartClient, MenuClient, OrderClient};
use crate::config::{AppConfig, StorageBackend};
use crate::model::{default_menu, CartId};
use crate::storage::{CartStore, FileStore, KeyValueStore, MemoryStore, MenuStore};
use crate::{menu_actor, order_actor};
use std::sync::Arc;
use tracing::{error, info};

/// Runs the menu, cart and order actors and wires them together.
///
/// # Architecture
///
/// - **Menu Actor**: the catalog, persisted through a [`MenuStore`] (`Context = MenuStore`)
/// - **Cart Actor**: cart sessions, persisted through a [`CartStore`] (`Context = CartStore`)
/// - **Order Actor**: checkout and kitchen workflow (`Context = (CartClient, MenuClient)`)
///
/// On start the menu is restored from `storage.menu_key`, or seeded with
/// [`default_menu`] when nothing usable is stored. The default cart, stored
/// under `storage.cart_key`, is opened and its id kept in
/// [`RestaurantSystem::cart_id`].
///
/// ```ignore
/// let system = RestaurantSystem::new(&AppConfig::default()).await?;
/// system.cart_client.add_to_cart(system.cart_id, &item, None).await?;
/// let order_id = system.order_client.checkout(system.cart_id, OrderType::DineIn).await?;
/// system.shutdown().await?;
/// ```
pub struct RestaurantSystem {
    pub menu_client: MenuClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    /// Session of the cart stored under `storage.cart_key`.
    pub cart_id: CartId,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RestaurantSystem {
    /// Starts the system on the storage backend named in `config`.
    pub async fn new(config: &AppConfig) -> Result<Self, CartError> {
        let backend: Arc<dyn KeyValueStore> = match config.storage.backend {
            StorageBackend::Memory => Arc::new(MemoryStore::new()),
            StorageBackend::File => Arc::new(FileStore::new(&config.storage.path)),
        };
        Self::with_backend(config, backend).await
    }

    /// Starts the system on an explicit backend, e.g. a [`MemoryStore`]
    /// shared with a previous system.
    pub async fn with_backend(
        config: &AppConfig,
        backend: Arc<dyn KeyValueStore>,
    ) -> Result<Self, CartError> {
        let mailbox = config.actors.mailbox;

        // 1. Create actors (no dependencies)
        let (mut menu_actor, menu_client) = menu_actor::new(mailbox);
        let (cart_actor, cart_client) = cart_actor::new(mailbox, config.cart.notify_after());
        let (order_actor, order_client) = order_actor::new(mailbox);

        // 2. Restore the menu before anyone can ask for it
        let menu_store = MenuStore::new(backend.clone(), config.storage.menu_key.clone());
        let items = menu_store.load().unwrap_or_else(default_menu);
        menu_store.replace_all(&items);
        info!(items = items.len(), key = %config.storage.menu_key, "Menu loaded");
        menu_actor.restore(items.into_iter().map(|item| (item.id, item)));

        // 3. Start actors with injected context
        let menu_handle = tokio::spawn(menu_actor.run(menu_store));
        let cart_handle = tokio::spawn(cart_actor.run(CartStore::new(backend)));
        let order_handle =
            tokio::spawn(order_actor.run((cart_client.clone(), menu_client.clone())));

        let handles = vec![menu_handle, cart_handle, order_handle];
        let cart_id = match cart_client.open_cart(config.storage.cart_key.clone()).await {
            Ok(id) => id,
            Err(e) => {
                for handle in &handles {
                    handle.abort();
                }
                return Err(e);
            }
        };
        info!(%cart_id, key = %config.storage.cart_key, "Restaurant system started");

        Ok(Self {
            menu_client,
            cart_client,
            order_client,
            cart_id,
            handles,
        })
    }

    /// Drops every client and waits for the actors to drain their mailboxes.
    ///
    /// The order actor holds clones of the cart and menu clients, so it has to
    /// stop before those two can.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.order_client);
        drop(self.cart_client);
        drop(self.menu_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
