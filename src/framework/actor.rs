//! # Generic Actor Server
//!
//! `ResourceActor` owns every entity of one type and processes requests one at a
//! time, so entity state never needs a lock.

use super::client::ResourceClient;
use super::entity::ActorEntity;
use super::error::FrameworkError;
use super::message::ResourceRequest;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of entities.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` returns the actor and its client.
/// 2.  **Wire**: pass dependencies (other clients, a store) into `actor.run(context)`.
/// 3.  **Run**: spawn the run loop on a tokio task.
///
/// Ids are handed out from a `u32` counter starting at 1. The store is a
/// `BTreeMap`, so `List` returns entities in id order.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates a new actor and its client.
    ///
    /// `buffer_size` is the mailbox capacity; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Loads previously persisted entities before the actor starts.
    ///
    /// Entities keep their ids. New ids continue after the highest restored
    /// one, so an id is never handed out twice.
    pub fn restore(&mut self, entities: impl IntoIterator<Item = (T::Id, T)>) {
        self.store.extend(entities);
        if let Some(highest) = self.store.keys().next_back() {
            while T::Id::from(self.next_id) <= *highest {
                self.next_id += 1;
            }
        }
    }

    /// Runs the event loop until every client has been dropped.
    ///
    /// The `context` is passed to every entity hook.
    pub async fn run(mut self, context: T::Context) {
        // "CartSession" rather than "kavya_cart::cart_actor::entity::CartSession"
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    match T::from_create_params(id.clone(), params) {
                        Ok(mut item) => {
                            if let Err(e) = item.on_create(&context).await {
                                warn!(entity_type, error = %e, "on_create failed");
                                let _ =
                                    respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                                continue;
                            }
                            self.store.insert(id.clone(), item);
                            info!(entity_type, %id, size = self.store.len(), "Created");
                            let _ = respond_to.send(Ok(id));
                        }
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    let items: Vec<T> = self.store.values().cloned().collect();
                    debug!(entity_type, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    // Hooks work on a copy so a failed update leaves the stored entity untouched.
                    let mut staged = item.clone();
                    match staged.on_update(update, &context).await {
                        Ok(()) => {
                            *item = staged.clone();
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(staged));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        }
                    }
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Table {
        id: u32,
        seats: u32,
        occupied: bool,
    }

    #[derive(Debug)]
    struct TableCreate {
        seats: u32,
    }

    #[derive(Debug)]
    struct TableUpdate {
        seats: u32,
    }

    #[derive(Debug)]
    enum TableAction {
        Seat,
    }

    #[derive(Debug, thiserror::Error)]
    enum TableError {
        #[error("a table needs at least one seat")]
        NoSeats,
        #[error("table already occupied")]
        Occupied,
    }

    #[async_trait]
    impl ActorEntity for Table {
        type Id = u32;
        type Create = TableCreate;
        type Update = TableUpdate;
        type Action = TableAction;
        type ActionResult = bool;
        type Context = ();
        type Error = TableError;

        fn from_create_params(id: u32, params: TableCreate) -> Result<Self, TableError> {
            if params.seats == 0 {
                return Err(TableError::NoSeats);
            }
            Ok(Self {
                id,
                seats: params.seats,
                occupied: false,
            })
        }

        async fn on_update(&mut self, update: TableUpdate, _ctx: &()) -> Result<(), TableError> {
            self.seats = update.seats;
            if self.seats == 0 {
                return Err(TableError::NoSeats);
            }
            Ok(())
        }

        async fn handle_action(
            &mut self,
            action: TableAction,
            _ctx: &(),
        ) -> Result<bool, TableError> {
            match action {
                TableAction::Seat if self.occupied => Err(TableError::Occupied),
                TableAction::Seat => {
                    self.occupied = true;
                    Ok(true)
                }
            }
        }
    }

    #[tokio::test]
    async fn test_resource_actor_lifecycle() {
        let (actor, client) = ResourceActor::<Table>::new(8);
        let handle = tokio::spawn(actor.run(()));

        let first = client.create(TableCreate { seats: 4 }).await.unwrap();
        let second = client.create(TableCreate { seats: 2 }).await.unwrap();
        assert_eq!((first, second), (1, 2));

        assert!(client.create(TableCreate { seats: 0 }).await.is_err());

        assert!(client.perform_action(first, TableAction::Seat).await.unwrap());
        let err = client
            .perform_action(first, TableAction::Seat)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_entity::<TableError>(),
            Ok(TableError::Occupied)
        ));

        let listed = client.list().await.unwrap();
        assert_eq!(listed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2]);

        client.delete(second).await.unwrap();
        assert!(client.get(second).await.unwrap().is_none());
        assert!(matches!(
            client.delete(second).await,
            Err(FrameworkError::NotFound(_))
        ));

        drop(client);
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_restored_entities_keep_ids() {
        let (mut actor, client) = ResourceActor::<Table>::new(8);
        let table = |id, seats| Table {
            id,
            seats,
            occupied: false,
        };
        actor.restore([(2, table(2, 4)), (5, table(5, 6))]);
        tokio::spawn(actor.run(()));

        assert_eq!(client.get(5).await.unwrap().unwrap().seats, 6);
        let next = client.create(TableCreate { seats: 2 }).await.unwrap();
        assert_eq!(next, 6);
        assert_eq!(
            client.list().await.unwrap().iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![2, 5, 6]
        );
    }

    #[tokio::test]
    async fn test_failed_update_keeps_previous_state() {
        let (actor, client) = ResourceActor::<Table>::new(8);
        tokio::spawn(actor.run(()));

        let id = client.create(TableCreate { seats: 4 }).await.unwrap();
        assert!(client.update(id, TableUpdate { seats: 0 }).await.is_err());

        let table = client.get(id).await.unwrap().unwrap();
        assert_eq!(table.seats, 4);

        let updated = client.update(id, TableUpdate { seats: 6 }).await.unwrap();
        assert_eq!(updated.seats, 6);
    }
}
