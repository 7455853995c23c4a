//! # Observability & Tracing
//!
//! Structured logs from every layer: actor lifecycle (`Actor started`,
//! `Shutdown`), each request at `debug` with its payload, each outcome at
//! `info`, and anything dropped or repaired (an unreadable stored cart, a
//! failed save) at `warn`.
//!
//! ```bash
//! RUST_LOG=info cargo run      # one line per operation
//! RUST_LOG=debug cargo run     # payloads and spice-level decisions
//! ```
//!
//! Client methods are `#[instrument]`ed, so a checkout shows up as:
//!
//! ```text
//! INFO checkout: Sending checkout to actor cart_id=CartId(1) order_type=DineIn
//! INFO Action ok entity_type="CartSession" id=cart_1
//! INFO Checked out order_id=order_1 total=520.0 items=3
//! INFO Created entity_type="Order" id=order_1 size=1
//! ```

/// Installs a compact fmt subscriber filtered by `RUST_LOG`.
///
/// Module paths are hidden; actor logs carry an `entity_type` field instead.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
