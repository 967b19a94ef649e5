//! Shared newtypes used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw strings found in the token files and API responses.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::str::FromStr;

// ─── HistorySlug ─────────────────────────────────────────────────────────────

/// Newtype for CoinGecko coin ids (e.g. `"polkadot"`, `"usd-coin"`).
///
/// The only merge and dedup key for asset entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct HistorySlug(String);

impl HistorySlug {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for HistorySlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Borrow<str> for HistorySlug {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for HistorySlug {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for HistorySlug {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for HistorySlug {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(HistorySlug(s.to_string()))
    }
}

impl Serialize for HistorySlug {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HistorySlug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(HistorySlug(s))
    }
}
