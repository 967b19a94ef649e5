//! Wire types for `/coins/markets` responses (REST).

use serde::{Deserialize, Serialize};

/// One row of `/coins/markets`. Only `id` matters here; the rest is kept for
/// debug logs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoinMarketResponse {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
}
