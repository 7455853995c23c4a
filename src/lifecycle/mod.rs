//! # System Lifecycle
//!
//! Starting, wiring and stopping the actors.
//!
//! Actors are created without their dependencies and receive them as the
//! `Context` passed to `run()`. The dependency graph is acyclic (orders read
//! carts and the menu, nothing reads orders), so dropping every client shuts
//! the whole system down: the order actor stops first and releases its
//! clones of the cart and menu clients, then those two stop.
//!
//! [`setup_tracing`] installs the log subscriber used by the binary.

pub mod restaurant_system;
pub mod tracing;

pub use self::restaurant_system::RestaurantSystem;
pub use self::tracing::setup_tracing;
