//! Coinbase REST API endpoint constants.
//!
//! Method paths are relative to `{host}/{version}/`.

/// Base URL for the Coinbase REST API.
pub const COINBASE_BASE_URL: &str = "https://api.coinbase.com";

/// Version segment used by the Coinbase v2 API.
pub const DEFAULT_API_VERSION: &str = "v2";

/// Public endpoints (no authentication required).
pub mod public {
    /// Spot price for a currency pair (e.g. "BTC-USD").
    pub fn spot_price(pair: &str) -> String {
        format!("prices/{pair}/spot")
    }
}

/// Private endpoints (authentication required).
pub mod private {
    /// List accounts.
    pub const ACCOUNTS: &str = "accounts";
}
