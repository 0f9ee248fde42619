//! Request builders for a single-table key-value store.
//!
//! Two builders assemble requests in the store's expression-based wire
//! protocol:
//!
//! - [`Getter`] reads one item by key, or a batch of items from one table.
//! - [`Updater`] creates or updates one item, with audit timestamps and an
//!   optional optimistic lock on a `rev` attribute.
//!
//! Builders never talk to the network themselves. Each one holds a [`Store`],
//! which carries a [`StoreClient`] and the [`StoreConfig`] defaults, and only
//! `execute()` hands the built request to that client.
//!
//! # Examples
//!
//! ```
//! # use tablekit_core::{Getter, Store};
//! # fn demo(store: &Store) -> Result<(), tablekit_core::BuilderError> {
//! let mut getter = Getter::new(store, "accounts", [("pk", "account#1")])?;
//! let params = getter.projection("email").projections(["name"]).get_item_params();
//! assert_eq!(params.projection_expression.as_deref(), Some("email, #name"));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod expression;
pub mod getter;
pub mod key;
pub mod marshal;
mod reserved;
pub mod store;
pub mod timestamp;
pub mod updater;

pub use client::StoreClient;
pub use config::StoreConfig;
pub use error::{BuilderError, BuilderResult};
pub use expression::LogicalOperator;
pub use getter::{AnyGetter, Batch, Getter, KeySelection, ReadMode, Single};
pub use reserved::is_reserved_word;
pub use store::Store;
pub use timestamp::AuditValue;
pub use updater::{Phase, Updater};
