//! Endpoint constants for the CoinGecko Pro API.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://pro-api.coingecko.com/api/v3";

/// Header carrying the Pro API key.
pub const API_KEY_HEADER: &str = "x-cg-pro-api-key";

/// Quote currency passed as `vs_currency`.
pub const DEFAULT_VS_CURRENCY: &str = "USD";
