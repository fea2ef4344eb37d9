//! HTTP transport module
//!
//! The resource client talks to the network only through [`HttpTransport`].
//!
//! # Features
//!
//! - **Transport trait**: send one request, get back status, headers and body
//! - **Reqwest backend**: timeouts, default headers, user agent
//! - **Rate Limiting**: Token bucket rate limiter using governor
//!
//! There are no retries here. A non-success status is returned to the
//! caller as-is; only connectivity failures become errors.

mod client;
mod rate_limit;

pub use client::{
    HttpClientConfig, HttpClientConfigBuilder, HttpTransport, RequestOptions, ReqwestTransport,
    TransportResponse,
};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
