//! Wire types for fragment files.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw token record from a per-network fragment file.
///
/// Values stay untyped here: fragments are hand-edited and carry numbers,
/// `null`s and empty strings where text is expected. `convert` decides what
/// is usable.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TokenRecordWire {
    #[serde(rename = "TokenSymbol", default, skip_serializing_if = "Option::is_none")]
    pub token_symbol: Option<Value>,
    #[serde(rename = "Coingecko API ID", default, skip_serializing_if = "Option::is_none")]
    pub coingecko_id: Option<Value>,
    #[serde(rename = "TokenID", default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<Value>,
    #[serde(rename = "Network", default, skip_serializing_if = "Option::is_none")]
    pub network: Option<Value>,
}

/// A fragment file holds one record object or an array of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FragmentDocument {
    Many(Vec<Value>),
    One(Value),
}

impl FragmentDocument {
    pub fn into_records(self) -> Vec<Value> {
        match self {
            FragmentDocument::Many(records) => records,
            FragmentDocument::One(record) => vec![record],
        }
    }
}
