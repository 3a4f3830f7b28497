//! HTTP client module
//!
//! Provides the HTTP client every endpoint sends through.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Session Header**: `X-Tableau-Auth` on authenticated calls
//! - **Error Classification**: XML error blocks become `ServerResponse`,
//!   anything else `NonXmlResponse`

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig, AUTH_HEADER};

#[cfg(test)]
mod tests;
