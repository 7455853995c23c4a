//! # Menu Client
//!
//! Admin and browsing operations on the menu catalog.
use crate::framework::{ActorClient, FrameworkError, ResourceClient};
use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> MenuError {
        match e {
            FrameworkError::NotFound(id) => MenuError::NotFound(id),
            other => other
                .downcast_entity::<MenuError>()
                .unwrap_or_else(|e| MenuError::ActorCommunicationError(e.to_string())),
        }
    }
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(name = %params.name))]
    pub async fn create_item(&self, params: MenuItemCreate) -> Result<MenuItemId, MenuError> {
        debug!(?params, "create_item called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        id: MenuItemId,
        update: MenuItemUpdate,
    ) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Items in `category`, in id order. Category names match exactly.
    #[instrument(skip(self))]
    pub async fn by_category(&self, category: &str) -> Result<Vec<MenuItem>, MenuError> {
        let mut items = self.list().await?;
        items.retain(|item| item.category == category);
        Ok(items)
    }

    /// Distinct categories in the order they first appear on the menu.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<String>, MenuError> {
        let mut seen: Vec<String> = Vec::new();
        for item in self.list().await? {
            if !seen.contains(&item.category) {
                seen.push(item.category);
            }
        }
        Ok(seen)
    }

    /// Creates every item in turn, stopping at the first rejected one.
    #[instrument(skip_all)]
    pub async fn seed(
        &self,
        items: impl IntoIterator<Item = MenuItemCreate>,
    ) -> Result<Vec<MenuItemId>, MenuError> {
        let mut ids = Vec::new();
        for params in items {
            ids.push(self.create_item(params).await?);
        }
        info!(count = ids.len(), "Menu seeded");
        Ok(ids)
    }
}
