//! Asset domain: token list entries, fragment parsing, aggregation and merge.

pub mod aggregate;
mod convert;
pub mod merge;
pub mod wire;

pub use convert::{SkipReason, TokenRecord};

use crate::shared::HistorySlug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─── AssetItem ───────────────────────────────────────────────────────────────

/// One entry of the CoinGecko token list.
///
/// Field names match the committed list exactly. Unknown fields on baseline
/// entries are carried through untouched, written after `quote`; key order
/// is always `Symbol`, `HistorySlug`, `quote`, then the rest. An entry
/// without a symbol is written without one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetItem {
    #[serde(rename = "Symbol", default, skip_serializing_if = "String::is_empty")]
    pub symbol: String,
    #[serde(rename = "HistorySlug")]
    pub history_slug: HistorySlug,
    /// `"<tokenID>:<network>"` entries.
    #[serde(default)]
    pub quote: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AssetItem {
    pub fn new(
        symbol: impl Into<String>,
        history_slug: impl Into<HistorySlug>,
        quote: Vec<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            history_slug: history_slug.into(),
            quote,
            extra: Map::new(),
        }
    }
}
