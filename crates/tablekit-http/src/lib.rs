//! HTTP client for the tablekit request builders.
//!
//! Sends built requests over the `awsJson1_0` protocol: every call is a
//! `POST /` whose operation is named by the `X-Amz-Target` header.
//!
//! - **Config**: endpoint, region and timeout, from the environment
//! - **Codec**: request encoding, response checksum and error decoding
//! - **Client**: [`HttpStoreClient`], a [`tablekit_core::StoreClient`]

pub mod client;
pub mod codec;
pub mod config;

pub use client::HttpStoreClient;
pub use config::HttpClientConfig;
