//! Baseline + aggregated list merge, keyed on `HistorySlug`.

use super::AssetItem;
use crate::shared::HistorySlug;
use std::collections::HashMap;

/// Merge the committed `baseline` with the freshly `aggregated` list.
///
/// - An aggregated entry replaces the baseline entry for the same slug
///   wholesale, `quote` included, even when empty.
/// - Aggregated entries come first in their order, then baseline-only
///   entries in theirs.
/// - A slug repeated within one list appears once, at its first position,
///   holding its last value.
pub fn merge_assets(baseline: &[AssetItem], aggregated: &[AssetItem]) -> Vec<AssetItem> {
    let mut latest: HashMap<&HistorySlug, &AssetItem> =
        HashMap::with_capacity(baseline.len() + aggregated.len());
    for item in baseline.iter().chain(aggregated) {
        latest.insert(&item.history_slug, item);
    }

    let mut merged = Vec::with_capacity(latest.len());
    for item in aggregated.iter().chain(baseline) {
        if let Some(winner) = latest.remove(&item.history_slug) {
            merged.push(winner.clone());
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(slug: &str, quote: &[&str]) -> AssetItem {
        AssetItem::new(slug.to_uppercase(), slug, quote.iter().map(|q| q.to_string()).collect())
    }

    fn slugs(items: &[AssetItem]) -> Vec<&str> {
        items.iter().map(|i| i.history_slug.as_str()).collect()
    }

    #[test]
    fn test_aggregated_wins_even_when_empty() {
        let merged = merge_assets(&[item("x", &["a"])], &[item("x", &[])]);
        assert_eq!(merged.len(), 1);
        assert!(merged[0].quote.is_empty());
    }

    #[test]
    fn test_aggregated_first_then_baseline_only() {
        let merged = merge_assets(&[item("x", &[]), item("y", &[])], &[item("z", &[])]);
        assert_eq!(slugs(&merged), vec!["z", "x", "y"]);
    }

    #[test]
    fn test_override_takes_aggregated_position() {
        let baseline = [item("x", &["1:a"]), item("y", &["2:a"])];
        let aggregated = [item("z", &[]), item("y", &["3:b"])];
        let merged = merge_assets(&baseline, &aggregated);
        assert_eq!(slugs(&merged), vec!["z", "y", "x"]);
        assert_eq!(merged[1].quote, vec!["3:b"]);
    }

    #[test]
    fn test_whole_entry_replaced() {
        let mut base = item("x", &["1:a"]);
        base.symbol = "OLD".to_string();
        base.extra.insert("Decimals".to_string(), serde_json::json!(10));
        let merged = merge_assets(&[base], &[AssetItem::new("NEW", "x", vec![])]);
        assert_eq!(merged[0].symbol, "NEW");
        assert!(merged[0].extra.is_empty());
    }

    #[test]
    fn test_merge_with_itself_is_identity() {
        let list = vec![item("a", &["1:n"]), item("b", &[]), item("c", &["2:n", "3:m"])];
        assert_eq!(merge_assets(&list, &list), list);
    }

    #[test]
    fn test_duplicate_slugs_collapse() {
        let aggregated = [item("t", &["1:a"]), item("u", &[]), item("t", &["2:b"])];
        let baseline = [item("v", &["x"]), item("v", &["y"])];
        let merged = merge_assets(&baseline, &aggregated);
        assert_eq!(slugs(&merged), vec!["t", "u", "v"]);
        assert_eq!(merged[0].quote, vec!["2:b"]);
        assert_eq!(merged[2].quote, vec!["y"]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(merge_assets(&[], &[]).is_empty());
        assert_eq!(slugs(&merge_assets(&[item("a", &[])], &[])), vec!["a"]);
    }
}
