//! Shared handle every builder is constructed from.

use std::sync::Arc;

use tablekit_model::AttributeValue;

use crate::client::StoreClient;
use crate::config::StoreConfig;
use crate::error::BuilderResult;
use crate::getter::{Batch, Getter, Single};
use crate::updater::Updater;

/// A client plus the defaults applied to new builders.
///
/// Cloning is cheap; builders keep their own clone so a request can be
/// executed without borrowing the store.
///
/// # Examples
///
/// ```no_run
/// # async fn demo(client: impl tablekit_core::StoreClient + 'static) -> Result<(), Box<dyn std::error::Error>> {
/// use tablekit_core::{Store, StoreConfig};
///
/// let store = Store::new(client, StoreConfig::default());
/// let output = store
///     .updater("accounts", [("pk", "account#1")])?
///     .rev(3)
///     .item([("email", "ada@example.com")])
///     .execute()
///     .await?;
/// # let _ = output;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Store {
    client: Arc<dyn StoreClient>,
    config: Arc<StoreConfig>,
}

impl Store {
    /// Create a store around a client.
    #[must_use]
    pub fn new(client: impl StoreClient + 'static, config: StoreConfig) -> Self {
        Self::with_shared_client(Arc::new(client), config)
    }

    /// Create a store around an already shared client.
    #[must_use]
    pub fn with_shared_client(client: Arc<dyn StoreClient>, config: StoreConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }

    /// The builder defaults.
    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The client requests are executed with.
    #[must_use]
    pub fn client(&self) -> &dyn StoreClient {
        self.client.as_ref()
    }

    /// Start a single-item read.
    pub fn getter<I, K, V>(&self, table: &str, key: I) -> BuilderResult<Getter<Single>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        Getter::new(self, table, key)
    }

    /// Start a batch read from one table.
    pub fn batch_getter<I, J, K, V>(&self, table: &str, keys: I) -> BuilderResult<Getter<Batch>>
    where
        I: IntoIterator<Item = J>,
        J: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        Getter::batch(self, table, keys)
    }

    /// Start an update of a single item.
    pub fn updater<I, K, V>(&self, table: &str, key: I) -> BuilderResult<Updater>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttributeValue>,
    {
        Updater::new(self, table, key)
    }
}
