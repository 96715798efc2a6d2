//! Public market-data endpoints (no authentication required).

use serde_json::Value;

use crate::error::CoinbaseError;
use crate::rest::client::CoinbaseRestClient;
use crate::rest::endpoints::public;
use crate::rest::params::FormParams;
use crate::rest::types::{DataEnvelope, SpotPrice};

impl CoinbaseRestClient {
    /// Get the spot price of a currency pair.
    ///
    /// Issues a bodyless `GET {host}/{version}/prices/{pair}/spot` and returns
    /// the decoded JSON as sent by the server.
    ///
    /// # Arguments
    ///
    /// * `pair` - Currency pair (e.g., "BTC-USD").
    pub async fn get_spot_price(&self, pair: &str) -> Result<Value, CoinbaseError> {
        self.query_public(&public::spot_price(pair), &FormParams::new(), false)
            .await
    }

    /// Get the spot price of a currency pair as a typed [`SpotPrice`].
    pub async fn spot_price(&self, pair: &str) -> Result<SpotPrice, CoinbaseError> {
        let value = self.get_spot_price(pair).await?;
        Ok(DataEnvelope::from_value(value)?.data)
    }
}
