//! # Kavya Cart
//!
//! The ordering core of the Kavya restaurant storefront: a menu catalog, a
//! cart that aggregates dishes by spice level, and checkout into orders the
//! kitchen works through.
//!
//! ## The cart
//!
//! A cart line is identified by *(menu item, spice level)*. Adding a dish that
//! is already in the cart at the same spice level bumps its quantity; a new
//! spice level gets its own line. Changing a line's spice level either
//! relabels it in place or, when the target level is already present, folds
//! its quantity into that line. No two lines ever share a key and no line has
//! a quantity below one. The engine is [`model::Cart`]; it is pure and can be
//! used on its own.
//!
//! ## Actors
//!
//! Each resource lives in a [`framework::ResourceActor`] on its own tokio task
//! and handles one request at a time, so state is never shared or locked:
//!
//! - [`menu_actor`] - the catalog
//! - [`cart_actor`] - cart sessions, written through to [`storage`] after every change
//! - [`order_actor`] - checkout and the Pending → Preparing → Served workflow
//!
//! Callers use the typed clients in [`clients`]. [`lifecycle::RestaurantSystem`]
//! starts and wires everything from an [`config::AppConfig`].
//!
//! ## Errors
//!
//! Cart operations never fail: unknown items are no-ops and a missing or
//! corrupt stored cart loads as empty. Each actor has its own `thiserror`
//! enum ([`cart_actor::CartError`], [`menu_actor::MenuError`],
//! [`order_actor::OrderError`]) and clients recover them from
//! [`framework::FrameworkError`].
//!
//! ## Testing
//!
//! See [`framework::mock`] for scripted clients that stand in for real actors.

pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod menu_actor;
pub mod model;
pub mod order_actor;
pub mod storage;
