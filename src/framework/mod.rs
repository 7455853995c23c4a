//! Generic actor framework for resource management.
//!
//! Every resource in the storefront (menu items, cart sessions, orders) is an
//! [`ActorEntity`] owned by a [`ResourceActor`] running on its own tokio task.
//! Callers talk to it through a cloneable [`ResourceClient`], usually wrapped in
//! a domain client implementing [`ActorClient`].
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor owning all entities of one type
//! - [`ResourceClient`] - Type-safe async client for a `ResourceActor`
//! - [`FrameworkError`] - Transport errors plus boxed entity errors
//!
//! # Testing
//!
//! See [`mock`] for scripted stand-ins that avoid spawning real actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
