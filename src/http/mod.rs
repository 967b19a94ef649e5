//! HTTP client layer: `CoingeckoHttp` with a bounded retry policy.

pub mod client;
pub mod retry;

pub use client::CoingeckoHttp;
pub use retry::{retry_with_backoff, RetryConfig};
