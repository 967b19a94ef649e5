//! Aggregate → merge → validate → write.

use crate::action::ActionContext;
use crate::config::{SyncConfig, TOKEN_INPUT};
use crate::domain::asset::aggregate::aggregate_directory;
use crate::domain::asset::merge::merge_assets;
use crate::domain::asset::AssetItem;
use crate::domain::market::{filter_recognized, MarketLookup};
use crate::error::{HttpError, SyncError};
use std::fs;
use std::path::{Path, PathBuf};

/// Output name under which the written file path is published.
pub const OUTPUT_NAME: &str = "json_filename";

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub aggregated: usize,
    pub baseline: usize,
    pub merged: usize,
    pub written: usize,
}

/// Run every stage and report a fatal error through `ctx`.
///
/// Returns whether the run succeeded.
pub async fn run<L, F>(config: &SyncConfig, ctx: &dyn ActionContext, connect: F) -> bool
where
    L: MarketLookup,
    F: FnOnce(String) -> Result<L, HttpError>,
{
    match execute(config, ctx, connect).await {
        Ok(summary) => {
            tracing::debug!(?summary, "run complete");
            true
        }
        Err(e) => {
            ctx.report_failure(&e.to_string());
            false
        }
    }
}

/// Run every stage.
///
/// Pre-flight checks (credential, baseline present) happen before any file
/// is scanned; `connect` is only called with the credential once the merged
/// list exists. Nothing is written unless at least one entry survives.
pub async fn execute<L, F>(
    config: &SyncConfig,
    ctx: &dyn ActionContext,
    connect: F,
) -> Result<RunSummary, SyncError>
where
    L: MarketLookup,
    F: FnOnce(String) -> Result<L, HttpError>,
{
    let token = ctx
        .get_input(TOKEN_INPUT)
        .ok_or(SyncError::MissingCredential)?;

    if !config.baseline_path.exists() {
        return Err(SyncError::BaselineMissing(config.baseline_path.clone()));
    }

    let aggregation = aggregate_directory(&config.assets_dir)?;
    for err in &aggregation.file_errors {
        ctx.log_error(&err.to_string());
    }
    for warning in &aggregation.warnings {
        ctx.log_warning(&warning.to_string());
    }
    tracing::info!(
        "Aggregated {} entries from {} fragment files ({} records skipped)",
        aggregation.items.len(),
        aggregation.files_read,
        aggregation.skipped_records
    );

    let baseline = load_baseline(&config.baseline_path)?;
    let merged = merge_assets(&baseline, &aggregation.items);
    let merged_len = merged.len();
    tracing::info!(
        "Merged {} baseline and {} aggregated entries into {}",
        baseline.len(),
        aggregation.items.len(),
        merged_len
    );

    let lookup = connect(token)?;
    let filtered = filter_recognized(merged, &lookup, ctx).await;
    if filtered.is_empty() {
        return Err(SyncError::EmptyResult);
    }

    write_output(&config.output_path, &filtered)?;
    let shown = config.output_path.display().to_string();
    ctx.set_output(OUTPUT_NAME, &shown)?;
    ctx.log_info(&format!("Combined JSON data has been written to {shown}"));

    Ok(RunSummary {
        output_path: config.output_path.clone(),
        aggregated: aggregation.items.len(),
        baseline: baseline.len(),
        merged: merged_len,
        written: filtered.len(),
    })
}

/// Read the committed token list.
pub fn load_baseline(path: &Path) -> Result<Vec<AssetItem>, SyncError> {
    let content = fs::read_to_string(path).map_err(|source| SyncError::BaselineRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| SyncError::BaselineParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write `items` as 2-space pretty JSON.
pub fn write_output(path: &Path, items: &[AssetItem]) -> Result<(), SyncError> {
    let json = serde_json::to_string_pretty(items)?;
    fs::write(path, json).map_err(|source| SyncError::Output {
        path: path.to_path_buf(),
        source,
    })
}
