//! Market domain: which ids the pricing API recognizes.

pub mod wire;

use crate::action::ActionContext;
use crate::domain::asset::AssetItem;
use crate::error::HttpError;
use crate::shared::HistorySlug;
use async_trait::async_trait;
use std::collections::HashSet;

// ─── MarketLookup ────────────────────────────────────────────────────────────

/// Source of truth for which coin ids have market data.
#[async_trait]
pub trait MarketLookup {
    /// The subset of `ids` the pricing API returns market rows for.
    async fn recognized_ids(&self, ids: &[HistorySlug]) -> Result<HashSet<String>, HttpError>;
}

// ─── Filter ──────────────────────────────────────────────────────────────────

/// Drop entries whose `HistorySlug` the pricing API does not recognize.
///
/// An empty list is returned as is, without a request. If the lookup fails
/// after its retries, the failure is logged and `items` come back
/// unfiltered: a stale list is better than none.
pub async fn filter_recognized<L>(
    items: Vec<AssetItem>,
    lookup: &L,
    ctx: &dyn ActionContext,
) -> Vec<AssetItem>
where
    L: MarketLookup + ?Sized,
{
    if items.is_empty() {
        return items;
    }

    let ids: Vec<HistorySlug> = items.iter().map(|item| item.history_slug.clone()).collect();
    let recognized = match lookup.recognized_ids(&ids).await {
        Ok(recognized) => recognized,
        Err(e) => {
            ctx.log_error(&format!("Failed to fetch coingecko data: {e}"));
            ctx.log_warning("Returning original data without filtering due to fetch error");
            return items;
        }
    };

    items
        .into_iter()
        .filter(|item| {
            let known = recognized.contains(item.history_slug.as_str());
            if !known {
                ctx.log_info(&format!("Filtered tokenid: {}", item.history_slug));
            }
            known
        })
        .collect()
}
