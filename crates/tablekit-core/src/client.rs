//! The boundary to whatever actually talks to the store.
//!
//! The builders only assemble requests. Executing one means handing it to a
//! [`StoreClient`]; errors the client returns reach the caller untouched, so a
//! failed revision check shows up as a `ConditionalCheckFailedException`
//! [`StoreError`] and the caller decides whether to re-read and retry.

use std::fmt;

use async_trait::async_trait;
use tablekit_model::StoreError;
use tablekit_model::input::{BatchGetItemInput, GetItemInput, UpdateItemInput};
use tablekit_model::output::{BatchGetItemOutput, GetItemOutput, UpdateItemOutput};

/// Executes built requests against the store.
///
/// Implementations own transport concerns (timeouts, retries, signing). The
/// trait is object-safe so a [`Store`](crate::store::Store) can hold any
/// client behind an `Arc<dyn StoreClient>`.
#[async_trait]
pub trait StoreClient: Send + Sync + fmt::Debug {
    /// Read a single item.
    async fn get_item(&self, input: GetItemInput) -> Result<GetItemOutput, StoreError>;

    /// Read several items, possibly from several tables.
    async fn batch_get_item(
        &self,
        input: BatchGetItemInput,
    ) -> Result<BatchGetItemOutput, StoreError>;

    /// Create or update a single item.
    async fn update_item(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, StoreError>;
}
