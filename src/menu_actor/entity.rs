//! [`ActorEntity`] implementation for [`MenuItem`].
//!
//! The admin console creates and edits items; every write is validated the
//! same way so a stored item always has a name and a usable price. Accepted
//! writes go straight through to the [`MenuStore`].

use super::error::MenuError;
use crate::framework::ActorEntity;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use crate::storage::MenuStore;
use async_trait::async_trait;

fn validate(item: &MenuItem) -> Result<(), MenuError> {
    if item.name.trim().is_empty() {
        return Err(MenuError::Validation("name must not be blank".to_string()));
    }
    if !item.price.is_finite() || item.price < 0.0 {
        return Err(MenuError::Validation(format!(
            "price must be a non-negative number, got {}",
            item.price
        )));
    }
    if item.category.trim().is_empty() {
        return Err(MenuError::Validation("category must not be blank".to_string()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = MenuStore;
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, MenuError> {
        let item = MenuItem {
            id,
            name: params.name,
            price: params.price,
            category: params.category,
            image: params.image,
            description: params.description,
            diet: params.diet,
            spice_level: params.spice_level,
        };
        validate(&item)?;
        Ok(item)
    }

    async fn on_create(&mut self, store: &MenuStore) -> Result<(), MenuError> {
        store.upsert(self);
        Ok(())
    }

    /// Applies whichever fields are set, then re-validates the whole item.
    async fn on_update(
        &mut self,
        update: MenuItemUpdate,
        store: &MenuStore,
    ) -> Result<(), MenuError> {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(diet) = update.diet {
            self.diet = diet;
        }
        if let Some(spice_level) = update.spice_level {
            self.spice_level = spice_level;
        }
        validate(self)?;
        store.upsert(self);
        Ok(())
    }

    async fn on_delete(&self, store: &MenuStore) -> Result<(), MenuError> {
        store.remove(self.id);
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &MenuStore) -> Result<(), MenuError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::sync::Arc;

    fn store() -> (MemoryStore, MenuStore) {
        let memory = MemoryStore::new();
        (memory.clone(), MenuStore::new(Arc::new(memory), "adminMenu"))
    }

    #[test]
    fn rejects_blank_names_and_bad_prices() {
        let blank = MenuItemCreate::new("   ", 100.0, "Starters");
        assert!(matches!(
            MenuItem::from_create_params(MenuItemId(1), blank),
            Err(MenuError::Validation(_))
        ));

        for price in [-1.0, f64::NAN, f64::INFINITY] {
            let params = MenuItemCreate::new("Gulab Jamun", price, "Desserts");
            assert!(MenuItem::from_create_params(MenuItemId(1), params).is_err());
        }

        let free = MenuItemCreate::new("Water", 0.0, "Beverages");
        assert!(MenuItem::from_create_params(MenuItemId(1), free).is_ok());
    }

    #[tokio::test]
    async fn partial_update_keeps_untouched_fields() {
        let (memory, store) = store();
        let params = MenuItemCreate::new("Dal", 150.0, "Main Course");
        let mut item = MenuItem::from_create_params(MenuItemId(1), params).unwrap();
        let update = MenuItemUpdate {
            price: Some(165.0),
            ..Default::default()
        };
        item.on_update(update, &store).await.unwrap();
        assert_eq!(item.price, 165.0);
        assert_eq!(item.name, "Dal");
        let saved = memory.load("adminMenu").unwrap().unwrap();
        assert!(saved.contains("165"));

        let bad = MenuItemUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(item.on_update(bad, &store).await.is_err());
        assert_eq!(memory.load("adminMenu").unwrap().unwrap(), saved);
    }

    #[tokio::test]
    async fn create_and_delete_write_through() {
        let (_, store) = store();
        let params = MenuItemCreate::new("Kulfi", 70.0, "Desserts");
        let mut item = MenuItem::from_create_params(MenuItemId(3), params).unwrap();
        item.on_create(&store).await.unwrap();
        assert_eq!(store.load().unwrap(), vec![item.clone()]);

        item.on_delete(&store).await.unwrap();
        assert_eq!(store.load().unwrap(), Vec::<MenuItem>::new());
    }
}
