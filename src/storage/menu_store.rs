use super::{KeyValueStore, StorageError};
use crate::model::{MenuItem, MenuItemId};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Keeps the admin menu under one key as a JSON array of items.
///
/// The store mirrors the menu actor's items so each write can flush the whole
/// list. Like [`CartStore`](super::CartStore) it never fails the caller: an
/// unreadable menu loads as `None`, and a failed flush is logged.
#[derive(Clone)]
pub struct MenuStore {
    backend: Arc<dyn KeyValueStore>,
    key: String,
    items: Arc<Mutex<BTreeMap<MenuItemId, MenuItem>>>,
}

impl MenuStore {
    pub fn new(backend: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
            items: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    /// Reads the stored menu. `None` when nothing usable is stored.
    pub fn load(&self) -> Option<Vec<MenuItem>> {
        match self.try_load() {
            Ok(Some(items)) => {
                debug!(key = %self.key, items = items.len(), "Restored menu");
                Some(items)
            }
            Ok(None) => {
                debug!(key = %self.key, "No stored menu");
                None
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Discarding unreadable menu");
                None
            }
        }
    }

    /// Makes `items` the whole menu and writes it out.
    pub fn replace_all(&self, items: &[MenuItem]) {
        self.write(|mirror| {
            mirror.clear();
            mirror.extend(items.iter().map(|item| (item.id, item.clone())));
        });
    }

    /// Adds or replaces one item and writes the menu out.
    pub fn upsert(&self, item: &MenuItem) {
        self.write(|mirror| {
            mirror.insert(item.id, item.clone());
        });
    }

    /// Drops one item and writes the menu out.
    pub fn remove(&self, id: MenuItemId) {
        self.write(|mirror| {
            mirror.remove(&id);
        });
    }

    fn write(&self, change: impl FnOnce(&mut BTreeMap<MenuItemId, MenuItem>)) {
        if let Err(e) = self.try_write(change) {
            warn!(key = %self.key, error = %e, "Menu not persisted");
        }
    }

    fn try_write(
        &self,
        change: impl FnOnce(&mut BTreeMap<MenuItemId, MenuItem>),
    ) -> Result<(), StorageError> {
        let mut mirror = self.items.lock().map_err(|_| StorageError::Poisoned)?;
        change(&mut *mirror);
        let items: Vec<&MenuItem> = mirror.values().collect();
        let raw = serde_json::to_string(&items)?;
        self.backend.save(&self.key, &raw)
    }

    fn try_load(&self) -> Result<Option<Vec<MenuItem>>, StorageError> {
        let Some(raw) = self.backend.load(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }
}
