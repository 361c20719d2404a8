//! HTTP client module
//!
//! JSON-over-HTTP transport shared by the admin and base clients.

mod client;

pub use client::{
    endpoint_url, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig,
};
