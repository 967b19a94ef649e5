//! Conversion: fragment record → TokenRecord (TryFrom + validation).

use super::wire::TokenRecordWire;
use serde_json::Value;
use std::fmt;

/// A fragment record that carries both a symbol and a CoinGecko id.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRecord {
    pub symbol: String,
    pub coingecko_id: String,
    pub token_id: Option<String>,
    pub network: Option<String>,
}

impl TokenRecord {
    /// Grouping key: `TokenSymbol + "_" + "Coingecko API ID"`.
    pub fn group_key(&self) -> String {
        format!("{}_{}", self.symbol, self.coingecko_id)
    }

    /// `"<TokenID>:<Network>"`; a missing side renders empty.
    pub fn quote_entry(&self) -> String {
        format!(
            "{}:{}",
            self.token_id.as_deref().unwrap_or_default(),
            self.network.as_deref().unwrap_or_default()
        )
    }

    pub fn is_incomplete(&self) -> bool {
        self.token_id.is_none() || self.network.is_none()
    }
}

/// Why a fragment record was left out of aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NotAnObject,
    MissingSymbol,
    MissingCoingeckoId,
    NotScalar(&'static str),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAnObject => write!(f, "Record is not an object"),
            SkipReason::MissingSymbol => write!(f, "Missing TokenSymbol"),
            SkipReason::MissingCoingeckoId => write!(f, "Missing Coingecko API ID"),
            SkipReason::NotScalar(field) => write!(f, "{field} is not a scalar value"),
        }
    }
}

impl std::error::Error for SkipReason {}

impl TryFrom<TokenRecordWire> for TokenRecord {
    type Error = SkipReason;

    fn try_from(source: TokenRecordWire) -> Result<Self, Self::Error> {
        let symbol = required_text(source.token_symbol.as_ref(), "TokenSymbol")?
            .ok_or(SkipReason::MissingSymbol)?;
        let coingecko_id = required_text(source.coingecko_id.as_ref(), "Coingecko API ID")?
            .ok_or(SkipReason::MissingCoingeckoId)?;

        Ok(TokenRecord {
            symbol,
            coingecko_id,
            token_id: optional_text(source.token_id.as_ref()),
            network: optional_text(source.network.as_ref()),
        })
    }
}

impl TryFrom<Value> for TokenRecord {
    type Error = SkipReason;

    fn try_from(source: Value) -> Result<Self, Self::Error> {
        if !source.is_object() {
            return Err(SkipReason::NotAnObject);
        }
        let wire: TokenRecordWire =
            serde_json::from_value(source).map_err(|_| SkipReason::NotAnObject)?;
        wire.try_into()
    }
}

/// Text of a key field. `Ok(None)` for the falsy values a fragment uses to
/// mean "not set": absent, `null`, `false`, `0`, `""`.
fn required_text(value: Option<&Value>, field: &'static str) -> Result<Option<String>, SkipReason> {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => Ok(None),
        Some(Value::Bool(true)) => Ok(Some("true".to_string())),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Array(_)) | Some(Value::Object(_)) => Err(SkipReason::NotScalar(field)),
    }
}

/// Text of a descriptive field. Any scalar is kept as written, `0` included.
fn optional_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
