//! Read request builder.
//!
//! A [`Getter`] fetches either one item by key ([`Single`]) or a list of items
//! by key from one table ([`Batch`]). The mode is a type parameter chosen at
//! construction, so a batch-only method on a single read does not compile.
//! [`AnyGetter`] covers callers that only learn the shape of their keys at
//! runtime; it reports the same misuse as [`BuilderError::ModeMismatch`].

use std::collections::HashMap;
use std::fmt;

use tablekit_model::input::{BatchGetItemInput, GetItemInput};
use tablekit_model::output::{BatchGetItemOutput, GetItemOutput};
use tablekit_model::types::KeysAndAttributes;
use tablekit_model::{AttributeValue, Item, StoreError};
use tracing::debug;

use crate::error::{BuilderError, BuilderResult};
use crate::expression::Projection;
use crate::key::{into_item, validate_key, validate_table_name};
use crate::store::Store;

const BATCH_TABLE_LOCKED: &str =
    "Cannot change the table of batch get request after initialization. Start over.";

/// Single-item mode: one key.
#[derive(Debug, Clone, PartialEq)]
pub struct Single {
    key: Item,
}

/// Batch mode: a list of keys from one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    keys: Vec<Item>,
}

/// Read request builder, parameterized by [`Single`] or [`Batch`] mode.
#[derive(Debug, Clone)]
pub struct Getter<M> {
    store: Store,
    table_name: String,
    mode: M,
    projection: Projection,
    consistent_read: bool,
}

impl<M> Getter<M> {
    fn with_mode(store: &Store, table: &str, mode: M) -> BuilderResult<Self> {
        validate_table_name(table)?;
        Ok(Self {
            store: store.clone(),
            table_name: table.to_owned(),
            mode,
            projection: Projection::default(),
            consistent_read: store.config().consistent_read,
        })
    }

    /// The table this request reads from.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Request one attribute back.
    ///
    /// The name is written into the projection as is, unless it is reserved
    /// or not a bare identifier, in which case it goes through a `#name`
    /// placeholder. Blank names and attributes already projected are
    /// ignored.
    pub fn projection(&mut self, attr: &str) -> &mut Self {
        self.projection.push_literal(attr);
        self
    }

    /// Request several attributes back, each through a `#name` placeholder.
    ///
    /// Blank entries and attributes already projected are ignored.
    pub fn projections<I, S>(&mut self, attrs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for attr in attrs {
            self.projection.push_placeholder(attr.as_ref());
        }
        self
    }

    /// Ask for a strongly consistent read.
    pub fn strong(&mut self) -> &mut Self {
        self.consistent_read = true;
        self
    }

    fn consistent_read_field(&self) -> Option<bool> {
        self.consistent_read.then_some(true)
    }

    fn projection_names(&self) -> HashMap<String, String> {
        self.projection.names().clone()
    }
}

// ---------------------------------------------------------------------------
// Single mode
// ---------------------------------------------------------------------------

impl Getter<Single> {
    /// Start a single-item read.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Validation`] for a blank table name or an
    /// empty key.
    pub fn new<I, K, V>(store: &Store, table: &str, key: I) -> BuilderResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        let key = into_item(key);
        validate_key(&key)?;
        Self::with_mode(store, table, Single { key })
    }

    /// Read from another table.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Validation`] for a blank table name.
    pub fn table(&mut self, name: &str) -> BuilderResult<&mut Self> {
        validate_table_name(name)?;
        name.clone_into(&mut self.table_name);
        Ok(self)
    }

    /// Replace the key.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Validation`] for an empty key.
    pub fn key<I, K, V>(&mut self, key: I) -> BuilderResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        let key = into_item(key);
        validate_key(&key)?;
        self.mode.key = key;
        Ok(self)
    }

    /// The current key.
    #[must_use]
    pub fn current_key(&self) -> &Item {
        &self.mode.key
    }

    /// Assemble the `GetItem` request.
    #[must_use]
    pub fn get_item_params(&self) -> GetItemInput {
        GetItemInput {
            table_name: self.table_name.clone(),
            key: self.mode.key.clone(),
            projection_expression: self.projection.expression(),
            expression_attribute_names: self.projection_names(),
            consistent_read: self.consistent_read_field(),
        }
    }

    /// Send the request through the store's client.
    ///
    /// # Errors
    ///
    /// Returns whatever error the client reports, unchanged.
    pub async fn execute(&self) -> Result<GetItemOutput, StoreError> {
        let input = self.get_item_params();
        debug!(table = %input.table_name, "executing get item");
        self.store.client().get_item(input).await
    }
}

// ---------------------------------------------------------------------------
// Batch mode
// ---------------------------------------------------------------------------

impl Getter<Batch> {
    /// Start a batch read of `keys` from `table`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Validation`] for a blank table name, an empty
    /// key list, or an empty key in the list.
    pub fn batch<I, J, K, V>(store: &Store, table: &str, keys: I) -> BuilderResult<Self>
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        let keys = collect_keys(keys)?;
        Self::with_mode(store, table, Batch { keys })
    }

    /// Always fails: batch requests are indexed by table name, so the table
    /// is fixed once keys have been attached to it.
    ///
    /// # Errors
    ///
    /// Always returns [`BuilderError::Configuration`].
    pub fn table(&mut self, _name: &str) -> BuilderResult<&mut Self> {
        Err(BuilderError::Configuration(BATCH_TABLE_LOCKED.to_owned()))
    }

    /// Replace the key list.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Validation`] for an empty list or an empty key.
    pub fn keys<I, J, K, V>(&mut self, keys: I) -> BuilderResult<&mut Self>
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        self.mode.keys = collect_keys(keys)?;
        Ok(self)
    }

    /// The current keys.
    #[must_use]
    pub fn current_keys(&self) -> &[Item] {
        &self.mode.keys
    }

    /// Assemble the `BatchGetItem` request.
    #[must_use]
    pub fn get_batch_params(&self) -> BatchGetItemInput {
        let keys = KeysAndAttributes {
            keys: self.mode.keys.clone(),
            projection_expression: self.projection.expression(),
            expression_attribute_names: self.projection_names(),
            consistent_read: self.consistent_read_field(),
        };
        BatchGetItemInput {
            request_items: HashMap::from([(self.table_name.clone(), keys)]),
        }
    }

    /// Send the request through the store's client.
    ///
    /// # Errors
    ///
    /// Returns whatever error the client reports, unchanged.
    pub async fn execute(&self) -> Result<BatchGetItemOutput, StoreError> {
        let input = self.get_batch_params();
        debug!(
            table = %self.table_name,
            keys = self.mode.keys.len(),
            "executing batch get item"
        );
        self.store.client().batch_get_item(input).await
    }
}

fn collect_keys<I, J, K, V>(keys: I) -> BuilderResult<Vec<Item>>
where
    I: IntoIterator<Item = J>,
    J: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<AttributeValue>,
{
    let keys: Vec<Item> = keys.into_iter().map(into_item).collect();
    if keys.is_empty() {
        return Err(BuilderError::Validation(
            "A batch get request needs at least one key.".to_owned(),
        ));
    }
    keys.iter().try_for_each(validate_key)?;
    Ok(keys)
}

// ---------------------------------------------------------------------------
// Runtime-selected mode
// ---------------------------------------------------------------------------

/// Keys for a read whose mode is decided by their shape.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySelection {
    /// One key: a single-item read.
    One(Item),
    /// A list of keys: a batch read.
    Many(Vec<Item>),
}

impl From<Item> for KeySelection {
    fn from(key: Item) -> Self {
        Self::One(key)
    }
}

impl From<Vec<Item>> for KeySelection {
    fn from(keys: Vec<Item>) -> Self {
        Self::Many(keys)
    }
}

/// The mode of an [`AnyGetter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadMode {
    /// One key.
    Single,
    /// A list of keys.
    Batch,
}

impl fmt::Display for ReadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Single => "single",
            Self::Batch => "batch",
        })
    }
}

fn mode_mismatch(actual: ReadMode, method: &str) -> BuilderError {
    BuilderError::ModeMismatch(format!("Cannot use .{method}() on a {actual} get request."))
}

/// A getter whose mode was picked at runtime from a [`KeySelection`].
///
/// The mode never changes after construction; mode-specific methods called
/// in the wrong mode fail with [`BuilderError::ModeMismatch`].
#[derive(Debug, Clone)]
pub enum AnyGetter {
    /// A single-item read.
    Single(Getter<Single>),
    /// A batch read.
    Batch(Getter<Batch>),
}

impl AnyGetter {
    /// Start a read, in batch mode when `keys` is a list.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::Validation`] for a blank table name or empty
    /// keys.
    pub fn new(store: &Store, table: &str, keys: impl Into<KeySelection>) -> BuilderResult<Self> {
        match keys.into() {
            KeySelection::One(key) => Getter::new(store, table, key).map(Self::Single),
            KeySelection::Many(keys) => Getter::batch(store, table, keys).map(Self::Batch),
        }
    }

    /// The mode fixed at construction.
    #[must_use]
    pub fn mode(&self) -> ReadMode {
        match self {
            Self::Single(_) => ReadMode::Single,
            Self::Batch(_) => ReadMode::Batch,
        }
    }

    fn single(&self, method: &str) -> BuilderResult<&Getter<Single>> {
        match self {
            Self::Single(getter) => Ok(getter),
            Self::Batch(_) => Err(mode_mismatch(ReadMode::Batch, method)),
        }
    }

    fn single_mut(&mut self, method: &str) -> BuilderResult<&mut Getter<Single>> {
        match self {
            Self::Single(getter) => Ok(getter),
            Self::Batch(_) => Err(mode_mismatch(ReadMode::Batch, method)),
        }
    }

    fn batch(&self, method: &str) -> BuilderResult<&Getter<Batch>> {
        match self {
            Self::Batch(getter) => Ok(getter),
            Self::Single(_) => Err(mode_mismatch(ReadMode::Single, method)),
        }
    }

    fn batch_mut(&mut self, method: &str) -> BuilderResult<&mut Getter<Batch>> {
        match self {
            Self::Batch(getter) => Ok(getter),
            Self::Single(_) => Err(mode_mismatch(ReadMode::Single, method)),
        }
    }

    /// Change the table of a single read.
    ///
    /// # Errors
    ///
    /// Validation error for a blank name; configuration error in batch mode.
    pub fn table(&mut self, name: &str) -> BuilderResult<&mut Self> {
        match self {
            Self::Single(getter) => {
                getter.table(name)?;
            }
            Self::Batch(getter) => {
                getter.table(name)?;
            }
        }
        Ok(self)
    }

    /// Replace the key of a single read.
    ///
    /// # Errors
    ///
    /// Mode mismatch in batch mode; validation error for an empty key.
    pub fn key(&mut self, key: Item) -> BuilderResult<&mut Self> {
        self.single_mut("key")?.key(key)?;
        Ok(self)
    }

    /// Replace the keys of a batch read.
    ///
    /// # Errors
    ///
    /// Mode mismatch in single mode; validation error for empty keys.
    pub fn keys(&mut self, keys: Vec<Item>) -> BuilderResult<&mut Self> {
        self.batch_mut("keys")?.keys(keys)?;
        Ok(self)
    }

    /// See [`Getter::projection`].
    pub fn projection(&mut self, attr: &str) -> &mut Self {
        match self {
            Self::Single(getter) => {
                getter.projection(attr);
            }
            Self::Batch(getter) => {
                getter.projection(attr);
            }
        }
        self
    }

    /// See [`Getter::projections`].
    pub fn projections<I, S>(&mut self, attrs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match self {
            Self::Single(getter) => {
                getter.projections(attrs);
            }
            Self::Batch(getter) => {
                getter.projections(attrs);
            }
        }
        self
    }

    /// See [`Getter::strong`].
    pub fn strong(&mut self) -> &mut Self {
        match self {
            Self::Single(getter) => {
                getter.strong();
            }
            Self::Batch(getter) => {
                getter.strong();
            }
        }
        self
    }

    /// The `GetItem` request of a single read.
    ///
    /// # Errors
    ///
    /// Mode mismatch in batch mode.
    pub fn get_item_params(&self) -> BuilderResult<GetItemInput> {
        Ok(self.single("get_item_params")?.get_item_params())
    }

    /// The `BatchGetItem` request of a batch read.
    ///
    /// # Errors
    ///
    /// Mode mismatch in single mode.
    pub fn get_batch_params(&self) -> BuilderResult<BatchGetItemInput> {
        Ok(self.batch("get_batch_params")?.get_batch_params())
    }

    /// Unwrap a single read.
    ///
    /// # Errors
    ///
    /// Mode mismatch in batch mode.
    pub fn into_single(self) -> BuilderResult<Getter<Single>> {
        match self {
            Self::Single(getter) => Ok(getter),
            Self::Batch(_) => Err(mode_mismatch(ReadMode::Batch, "into_single")),
        }
    }

    /// Unwrap a batch read.
    ///
    /// # Errors
    ///
    /// Mode mismatch in single mode.
    pub fn into_batch(self) -> BuilderResult<Getter<Batch>> {
        match self {
            Self::Batch(getter) => Ok(getter),
            Self::Single(_) => Err(mode_mismatch(ReadMode::Single, "into_batch")),
        }
    }
}
