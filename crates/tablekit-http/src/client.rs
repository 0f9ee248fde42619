//! [`StoreClient`] over HTTP.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tablekit_core::StoreClient;
use tablekit_model::input::{BatchGetItemInput, GetItemInput, UpdateItemInput};
use tablekit_model::output::{BatchGetItemOutput, GetItemOutput, UpdateItemOutput};
use tablekit_model::{StoreError, StoreOperation};
use tracing::debug;

use crate::codec::{CONTENT_TYPE, decode_response, encode_request};
use crate::config::HttpClientConfig;

/// Sends built requests to a store endpoint.
///
/// Requests are not signed; point it at an endpoint that accepts unsigned
/// requests, such as a local emulator.
#[derive(Debug, Clone)]
pub struct HttpStoreClient {
    http: reqwest::Client,
    config: Arc<HttpClientConfig>,
}

impl HttpStoreClient {
    /// Create a client.
    ///
    /// # Errors
    ///
    /// Returns an `InternalServerError` if the HTTP stack cannot be set up.
    pub fn new(config: HttpClientConfig) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                StoreError::internal(format!("Cannot build HTTP client: {e}")).with_source(e)
            })?;
        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    /// Create a client configured from the environment.
    ///
    /// # Errors
    ///
    /// See [`HttpStoreClient::new`].
    pub fn from_env() -> Result<Self, StoreError> {
        Self::new(HttpClientConfig::from_env())
    }

    /// The client configuration.
    #[must_use]
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    async fn call<I, O>(&self, operation: StoreOperation, input: &I) -> Result<O, StoreError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        let body = encode_request(input)?;
        debug!(
            operation = %operation,
            endpoint = %self.config.endpoint,
            bytes = body.len(),
            "sending store request"
        );

        let response = self
            .http
            .post(&self.config.endpoint)
            .header(http::header::CONTENT_TYPE, CONTENT_TYPE)
            .header("x-amz-target", operation.target())
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?;
        debug!(operation = %operation, status = status.as_u16(), "received store response");

        decode_response(status, &headers, &body)
    }
}

fn transport_error(e: reqwest::Error) -> StoreError {
    StoreError::internal(format!("Store request failed: {e}")).with_source(e)
}

#[async_trait]
impl StoreClient for HttpStoreClient {
    async fn get_item(&self, input: GetItemInput) -> Result<GetItemOutput, StoreError> {
        self.call(StoreOperation::GetItem, &input).await
    }

    async fn batch_get_item(
        &self,
        input: BatchGetItemInput,
    ) -> Result<BatchGetItemOutput, StoreError> {
        self.call(StoreOperation::BatchGetItem, &input).await
    }

    async fn update_item(&self, input: UpdateItemInput) -> Result<UpdateItemOutput, StoreError> {
        self.call(StoreOperation::UpdateItem, &input).await
    }
}
