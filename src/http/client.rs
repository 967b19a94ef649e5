//! Low-level HTTP client for `/coins/markets`.
//!
//! Covers the one endpoint the pipeline needs, `/coins/markets`, with a
//! per-attempt timeout and the retry policy from [`super::retry`].

use crate::config::SyncConfig;
use crate::domain::market::wire::CoinMarketResponse;
use crate::domain::market::MarketLookup;
use crate::error::HttpError;
use crate::http::retry::{retry_with_backoff, RetryConfig};
use crate::network::{API_KEY_HEADER, DEFAULT_VS_CURRENCY};
use crate::shared::HistorySlug;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::time::Duration;

/// Default per-attempt timeout for `/coins/markets`.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Low-level HTTP client for the CoinGecko Pro REST API.
#[derive(Clone)]
pub struct CoingeckoHttp {
    base_url: String,
    client: Client,
    /// Pro API key. NEVER logged.
    api_key: String,
    vs_currency: String,
    request_timeout: Duration,
    retry: RetryConfig,
}

impl CoingeckoHttp {
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, HttpError> {
        let client = Client::builder().pool_max_idle_per_host(1).build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            api_key: api_key.into(),
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryConfig::default(),
        })
    }

    /// Client wired with the endpoint, currency, timeout and retry settings
    /// of a run.
    pub fn from_config(config: &SyncConfig, api_key: impl Into<String>) -> Result<Self, HttpError> {
        Ok(Self::new(&config.api_url, api_key)?
            .with_vs_currency(&config.vs_currency)
            .with_timeout(config.request_timeout)
            .with_retry(config.retry.clone()))
    }

    pub fn with_vs_currency(mut self, vs_currency: &str) -> Self {
        self.vs_currency = vs_currency.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    // ── Coins ────────────────────────────────────────────────────────────

    pub fn coin_markets_url(&self, ids: &[HistorySlug]) -> String {
        let ids = ids
            .iter()
            .map(|id| urlencoding::encode(id.as_str()))
            .collect::<Vec<_>>()
            .join(",");
        format!(
            "{}/coins/markets?vs_currency={}&ids={}",
            self.base_url,
            urlencoding::encode(&self.vs_currency),
            ids
        )
    }

    pub async fn get_coin_markets(
        &self,
        ids: &[HistorySlug],
    ) -> Result<Vec<CoinMarketResponse>, HttpError> {
        let url = self.coin_markets_url(ids);
        tracing::info!("Checking coingecko token: {}", url);
        let url = url.as_str();
        retry_with_backoff(&self.retry, "coingecko data", |_| self.get(url)).await
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let resp = self
            .client
            .get(url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .header("Content-Type", "application/json")
            .header("accept", "application/json")
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if status.is_success() {
            return resp.json::<T>().await.map_err(|e| self.classify(e));
        }

        let body = resp.text().await.unwrap_or_default();
        Err(HttpError::Status {
            status: status.as_u16(),
            body,
        })
    }

    fn classify(&self, e: reqwest::Error) -> HttpError {
        if e.is_timeout() {
            HttpError::Timeout(self.request_timeout.as_millis() as u64)
        } else {
            HttpError::Reqwest(e)
        }
    }
}

#[async_trait]
impl MarketLookup for CoingeckoHttp {
    async fn recognized_ids(&self, ids: &[HistorySlug]) -> Result<HashSet<String>, HttpError> {
        let rows = self.get_coin_markets(ids).await?;
        tracing::debug!("coingecko returned {} of {} ids", rows.len(), ids.len());
        Ok(rows.into_iter().map(|row| row.id).collect())
    }
}
