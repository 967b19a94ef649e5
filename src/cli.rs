//! CLI argument parsing.
//!
//! Uses clap for argument parsing with environment variable fallbacks. The
//! credential is not an argument: it comes from the action input.

use crate::config::{SyncConfig, DEFAULT_ASSETS_DIR, DEFAULT_BASELINE_PATH, DEFAULT_OUTPUT_PATH};
use crate::http::RetryConfig;
use crate::network::{DEFAULT_API_URL, DEFAULT_VS_CURRENCY};
use clap::{Parser, ValueHint};
use std::path::PathBuf;
use std::time::Duration;

/// Merge per-network token fragments into the CoinGecko token list and drop
/// ids CoinGecko does not know.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory of per-network fragment files
    #[arg(
        long = "assets-dir",
        env = "ASSETS_DIR",
        default_value = DEFAULT_ASSETS_DIR,
        value_hint = ValueHint::DirPath
    )]
    pub assets_dir: PathBuf,

    /// Committed token list to merge into
    #[arg(
        long = "baseline",
        env = "BASELINE_PATH",
        default_value = DEFAULT_BASELINE_PATH,
        value_hint = ValueHint::FilePath
    )]
    pub baseline: PathBuf,

    /// Where to write the merged list
    #[arg(
        short = 'o',
        long = "output",
        env = "OUTPUT_PATH",
        default_value = DEFAULT_OUTPUT_PATH,
        value_hint = ValueHint::FilePath
    )]
    pub output: PathBuf,

    /// CoinGecko API base URL
    #[arg(
        long = "api-url",
        env = "COINGECKO_API_URL",
        default_value = DEFAULT_API_URL,
        value_hint = ValueHint::Url
    )]
    pub api_url: String,

    /// Quote currency for the markets lookup
    #[arg(long = "vs-currency", env = "VS_CURRENCY", default_value = DEFAULT_VS_CURRENCY)]
    pub vs_currency: String,

    /// Per-attempt timeout in seconds
    #[arg(long = "timeout-secs", env = "COINGECKO_TIMEOUT_SECS", default_value = "60")]
    pub timeout_secs: u64,

    /// Attempts before giving up on the lookup (1 = no retry)
    #[arg(
        long = "max-attempts",
        env = "COINGECKO_MAX_ATTEMPTS",
        default_value = "3",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max_attempts: u32,
}

impl From<Args> for SyncConfig {
    fn from(args: Args) -> Self {
        SyncConfig {
            assets_dir: args.assets_dir,
            baseline_path: args.baseline,
            output_path: args.output,
            api_url: args.api_url,
            vs_currency: args.vs_currency,
            request_timeout: Duration::from_secs(args.timeout_secs),
            retry: RetryConfig {
                max_attempts: args.max_attempts,
                ..RetryConfig::default()
            },
        }
    }
}
