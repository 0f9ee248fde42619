//! Wire types for the tablekit request builders.
//!
//! The store speaks the DynamoDB `awsJson1_0` protocol, so every type here
//! serializes to the exact JSON shape the store expects. Types are hand-written
//! with serde derives; only the three item operations the builders produce
//! (`GetItem`, `BatchGetItem`, `UpdateItem`) are modelled.
// "DynamoDB" appears in many doc comments in this crate.
#![allow(clippy::doc_markdown)]
#![allow(clippy::module_name_repetitions)]

pub mod attribute_value;
pub mod error;
pub mod input;
pub mod operations;
pub mod output;
pub mod types;

pub use attribute_value::{AttributeValue, Item};
pub use error::{ErrorCode, StoreError};
pub use operations::StoreOperation;
