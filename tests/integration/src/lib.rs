//! Integration tests for the tablekit builders.
//!
//! These tests require a DynamoDB-compatible endpoint that accepts unsigned
//! requests at `localhost:4566` (override with `TABLEKIT_ENDPOINT_URL`).
//! They are marked `#[ignore]` so they don't run during normal `cargo test`.
//!
//! Run them with:
//! ```text
//! cargo test -p tablekit-integration -- --ignored
//! ```

use std::sync::Once;

use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
};
use tablekit_core::{Store, StoreConfig};
use tablekit_http::{HttpClientConfig, HttpStoreClient};

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Endpoint shared by the builders and the setup client.
fn endpoint_url() -> String {
    HttpClientConfig::from_env().endpoint
}

/// A store whose builders execute against the test endpoint.
#[must_use]
pub fn store() -> Store {
    init_tracing();
    let client = HttpStoreClient::from_env()
        .unwrap_or_else(|e| panic!("failed to build store client: {e}"));
    Store::new(client, StoreConfig::default())
}

/// A DynamoDB SDK client for table setup and teardown.
#[must_use]
pub fn dynamodb_client() -> aws_sdk_dynamodb::Client {
    init_tracing();

    let creds = Credentials::new("test", "test", None, None, "integration-test");

    let config = aws_sdk_dynamodb::config::Builder::new()
        .behavior_version(BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(creds)
        .endpoint_url(endpoint_url())
        .build();

    aws_sdk_dynamodb::Client::from_conf(config)
}

/// Generate a unique table name for a test.
#[must_use]
pub fn test_table_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a table keyed by a string `pk` and return its name. Caller is
/// responsible for cleanup.
pub async fn create_test_table(client: &aws_sdk_dynamodb::Client, prefix: &str) -> String {
    let name = test_table_name(prefix);
    client
        .create_table()
        .table_name(&name)
        .key_schema(
            KeySchemaElement::builder()
                .attribute_name("pk")
                .key_type(KeyType::Hash)
                .build()
                .unwrap(),
        )
        .attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name("pk")
                .attribute_type(ScalarAttributeType::S)
                .build()
                .unwrap(),
        )
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await
        .unwrap_or_else(|e| panic!("failed to create table {name}: {e}"));
    name
}

/// Delete a table, ignoring failures.
pub async fn cleanup_table(client: &aws_sdk_dynamodb::Client, table: &str) {
    let _ = client.delete_table().table_name(table).send().await;
}

mod test_getter;
mod test_updater;
