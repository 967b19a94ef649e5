//! # merge-coingecko
//!
//! Reconciles per-network token fragments with the committed CoinGecko token
//! list, drops ids the pricing API does not know, and writes the result for
//! the rest of the price pipeline.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: `AssetItem`, fragment parsing, aggregation and merge (pure, no I/O beyond file reads)
//! 2. **HTTP API**: `CoingeckoHttp` with a bounded retry policy
//! 3. **Action**: `ActionContext`, the narrow seam to the CI runtime
//! 4. **Pipeline**: the four stages wired together, driven by `SyncConfig`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use merge_coingecko::prelude::*;
//!
//! let config = SyncConfig::default();
//! let ctx = GithubActions::from_env();
//! let ok = pipeline::run(&config, &ctx, |token| CoingeckoHttp::from_config(&config, token)).await;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes used across all domains.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions.
pub mod domain;

/// Unified error types.
pub mod error;

/// Endpoint constants.
pub mod network;

// ── Layer 2: HTTP API ────────────────────────────────────────────────────────

/// HTTP client with retry policies.
pub mod http;

// ── Layer 3: Action ──────────────────────────────────────────────────────────

/// CI runtime abstraction: inputs, logs, outputs, failure.
pub mod action;

// ── Layer 4: Pipeline ────────────────────────────────────────────────────────

/// Command-line front end, mapped onto `SyncConfig`.
pub mod cli;

/// Run configuration: paths, endpoint, timeout, retry.
pub mod config;

/// Logging setup for the binary.
pub mod logging;

/// Aggregate → merge → validate → write.
pub mod pipeline;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::shared::HistorySlug;

    // Domain types
    pub use crate::domain::asset::aggregate::{aggregate_directory, AggregateWarning, Aggregation};
    pub use crate::domain::asset::merge::merge_assets;
    pub use crate::domain::asset::AssetItem;
    pub use crate::domain::market::{filter_recognized, MarketLookup};

    // Errors
    pub use crate::error::{ActionError, AggregateError, HttpError, SyncError};

    // HTTP
    pub use crate::http::retry::{retry_with_backoff, RetryConfig};
    pub use crate::http::CoingeckoHttp;

    // Action + pipeline
    pub use crate::action::{ActionContext, GithubActions, MemoryContext};
    pub use crate::config::SyncConfig;
    pub use crate::pipeline::{self, RunSummary};
}
