//! Fragment directory scan. Groups token records into asset entries.

use super::wire::FragmentDocument;
use super::{AssetItem, TokenRecord};
use crate::error::AggregateError;
use crate::shared::HistorySlug;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Placeholder fragment kept in the directory for contributors; never data.
pub const TEMPLATE_FILE: &str = "template.json";

/// Result of one directory scan.
#[derive(Debug, Default)]
pub struct Aggregation {
    /// One entry per `TokenSymbol`/`Coingecko API ID` pair, first-seen order.
    pub items: Vec<AssetItem>,
    /// Files that could not be read or parsed. The scan went on without them.
    pub file_errors: Vec<AggregateError>,
    /// Data problems that did not stop the scan but change the output.
    pub warnings: Vec<AggregateWarning>,
    /// Records dropped for lack of a symbol or id.
    pub skipped_records: usize,
    pub files_read: usize,
}

/// Something in the fragments that the caller should surface.
#[derive(Debug, Clone, PartialEq)]
pub enum AggregateWarning {
    /// A record without `TokenID` or `Network`; its quote has an empty side.
    IncompleteRecord { file: String, index: usize, key: String },
    /// A group key with more than one `_`, cut down to two pieces.
    AmbiguousKey {
        key: String,
        symbol: String,
        history_slug: HistorySlug,
    },
    /// Two groups produced the same `HistorySlug`. Merging keeps only the
    /// later one, so the earlier group's quotes are lost.
    SlugCollision {
        history_slug: HistorySlug,
        kept_symbol: String,
        dropped_symbol: String,
        dropped_quote: Vec<String>,
    },
}

impl fmt::Display for AggregateWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateWarning::IncompleteRecord { file, index, key } => {
                write!(f, "{file} record {index} ({key}) has no TokenID or Network")
            }
            AggregateWarning::AmbiguousKey {
                key,
                symbol,
                history_slug,
            } => write!(
                f,
                "Key {key} contains more than one '_'; using Symbol={symbol} HistorySlug={history_slug}"
            ),
            AggregateWarning::SlugCollision {
                history_slug,
                kept_symbol,
                dropped_symbol,
                dropped_quote,
            } => write!(
                f,
                "HistorySlug {history_slug} is produced by both {dropped_symbol} and {kept_symbol}; \
                 keeping {kept_symbol}, dropping quotes [{}] of {dropped_symbol}",
                dropped_quote.join(", ")
            ),
        }
    }
}

/// Scan `dir` for fragment files and group their records.
///
/// Only a failure to list `dir` is an error; a bad file lands in
/// [`Aggregation::file_errors`].
pub fn aggregate_directory(dir: &Path) -> Result<Aggregation, AggregateError> {
    let mut aggregation = Aggregation::default();
    let mut groups: IndexMap<String, Vec<TokenRecord>> = IndexMap::new();

    for path in fragment_files(dir)? {
        let file = file_label(&path);
        let records = match read_fragment(&path, &file) {
            Ok(records) => records,
            Err(e) => {
                tracing::debug!("Skipping {}: {}", file, e);
                aggregation.file_errors.push(e);
                continue;
            }
        };
        aggregation.files_read += 1;

        for (index, raw) in records.into_iter().enumerate() {
            match TokenRecord::try_from(raw) {
                Ok(record) => {
                    if record.is_incomplete() {
                        aggregation.warnings.push(AggregateWarning::IncompleteRecord {
                            file: file.clone(),
                            index,
                            key: record.group_key(),
                        });
                    }
                    groups.entry(record.group_key()).or_default().push(record);
                }
                Err(reason) => {
                    tracing::debug!("{} record {} skipped: {}", file, index, reason);
                    aggregation.skipped_records += 1;
                }
            }
        }
    }

    for (key, records) in groups {
        let (symbol, history_slug, ambiguous) = split_group_key(&key);
        if ambiguous {
            aggregation.warnings.push(AggregateWarning::AmbiguousKey {
                key: key.clone(),
                symbol: symbol.clone(),
                history_slug: history_slug.clone(),
            });
        }
        aggregation.items.push(AssetItem::new(
            symbol,
            history_slug,
            records.iter().map(TokenRecord::quote_entry).collect(),
        ));
    }
    aggregation.warnings.extend(slug_collisions(&aggregation.items));

    Ok(aggregation)
}

/// Entries that share a `HistorySlug` with a later entry. Each collision
/// names the earlier holder, whose quotes a merge discards.
fn slug_collisions(items: &[AssetItem]) -> Vec<AggregateWarning> {
    let mut holder: HashMap<&HistorySlug, &AssetItem> = HashMap::new();
    let mut collisions = Vec::new();
    for item in items {
        if let Some(previous) = holder.insert(&item.history_slug, item) {
            collisions.push(AggregateWarning::SlugCollision {
                history_slug: item.history_slug.clone(),
                kept_symbol: item.symbol.clone(),
                dropped_symbol: previous.symbol.clone(),
                dropped_quote: previous.quote.clone(),
            });
        }
    }
    collisions
}

/// `*.json` files in `dir` (extension case-insensitive), minus the template,
/// sorted by name.
fn fragment_files(dir: &Path) -> Result<Vec<PathBuf>, AggregateError> {
    let read_dir_err = |source| AggregateError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_err)? {
        let entry = entry.map_err(read_dir_err)?;
        let path = entry.path();
        if entry.file_name() == TEMPLATE_FILE {
            continue;
        }
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn read_fragment(path: &Path, file: &str) -> Result<Vec<serde_json::Value>, AggregateError> {
    let content = fs::read_to_string(path).map_err(|source| AggregateError::ReadFile {
        file: file.to_string(),
        source,
    })?;
    let document: FragmentDocument =
        serde_json::from_str(&content).map_err(|source| AggregateError::ParseFile {
            file: file.to_string(),
            source,
        })?;
    Ok(document.into_records())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Split a group key back into `Symbol` and `HistorySlug`.
///
/// The key is cut at every `_` and only the first two pieces are kept, so a
/// symbol or id containing `_` loses its tail. Lists already published were
/// built this way; the third value flags keys that hit the case so they can
/// be reported until real data tells whether the remainder should be kept.
fn split_group_key(key: &str) -> (String, HistorySlug, bool) {
    let mut parts = key.split('_');
    let symbol = parts.next().unwrap_or_default();
    let slug = parts.next().unwrap_or_default();
    let ambiguous = parts.next().is_some();
    (symbol.to_string(), HistorySlug::from(slug), ambiguous)
}
