//! Run configuration.

use crate::http::client::DEFAULT_REQUEST_TIMEOUT;
use crate::http::RetryConfig;
use crate::network::{DEFAULT_API_URL, DEFAULT_VS_CURRENCY};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ASSETS_DIR: &str = "./assets";
pub const DEFAULT_BASELINE_PATH: &str = "./kubernetes-manifests/subscan/networks/coingecko-token.json";
pub const DEFAULT_OUTPUT_PATH: &str = "./combined_output_coingecko.json";

/// Action input holding the CoinGecko Pro API key.
pub const TOKEN_INPUT: &str = "coingecko_token";

/// Everything one run needs besides the credential.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// Directory of per-network fragment files.
    pub assets_dir: PathBuf,
    /// Committed token list the fragments are merged into.
    pub baseline_path: PathBuf,
    pub output_path: PathBuf,
    pub api_url: String,
    pub vs_currency: String,
    /// Per-attempt timeout for the markets lookup.
    pub request_timeout: Duration,
    pub retry: RetryConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from(DEFAULT_ASSETS_DIR),
            baseline_path: PathBuf::from(DEFAULT_BASELINE_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            api_url: DEFAULT_API_URL.to_string(),
            vs_currency: DEFAULT_VS_CURRENCY.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            retry: RetryConfig::default(),
        }
    }
}
