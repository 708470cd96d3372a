//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging for any binary built on
//! the store actor.
//!
//! ## What Gets Traced
//!
//! - **Store lifecycle**: startup and a shutdown summary (`committed`, `rolled_back`)
//! - **Transactions**: `debug` on commit, `warn` on rollback, `error` on panic, each with
//!   the request `label`
//! - **Service calls**: spans created by `#[tracing::instrument]` on client methods
//!
//! ## Usage Examples
//!
//! ```bash
//! # Rollbacks and lifecycle only
//! RUST_LOG=info cargo run
//!
//! # Every committed transaction and read
//! RUST_LOG=debug cargo run
//!
//! # Filter to the store
//! RUST_LOG=store_actor=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=debug`**:
//!
//! ```text
//! INFO Store started schema="BookstoreTables"
//! DEBUG create_order: Read schema="BookstoreTables" label="load_cart_books"
//! DEBUG create_order: Committed schema="BookstoreTables" label="create_order"
//! WARN confirm_order: Rolled back schema="BookstoreTables" label="confirm_order"
//! ```

/// Installs a compact `tracing-subscriber` formatter filtered by `RUST_LOG`.
///
/// Defaults to `info` when `RUST_LOG` is unset or invalid.
pub fn setup_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
