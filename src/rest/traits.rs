//! Trait definition for the Coinbase REST API client.
//!
//! Hosting applications depend on [`CoinbaseClient`] rather than on the
//! concrete client, and inject a configured [`CoinbaseRestClient`] (or a mock)
//! at construction time.
//!
//! # Example
//!
//! ```rust,ignore
//! use coinbase_api_client::rest::CoinbaseClient;
//!
//! async fn show_price<C: CoinbaseClient>(client: &C) -> Result<(), coinbase_api_client::CoinbaseError> {
//!     let price = client.spot_price("BTC-USD").await?;
//!     println!("BTC-USD: {}", price.amount);
//!     Ok(())
//! }
//! ```

use std::future::Future;

use serde_json::Value;

use crate::error::CoinbaseError;
use crate::rest::client::CoinbaseRestClient;
use crate::rest::types::{Account, SpotPrice};

/// Trait defining the Coinbase REST API operations.
pub trait CoinbaseClient: Send + Sync {
    /// Get the spot price of a currency pair as raw JSON.
    fn get_spot_price(&self, pair: &str)
    -> impl Future<Output = Result<Value, CoinbaseError>> + Send;

    /// Get the spot price of a currency pair.
    fn spot_price(&self, pair: &str)
    -> impl Future<Output = Result<SpotPrice, CoinbaseError>> + Send;

    /// List accounts as raw JSON.
    fn get_accounts(&self) -> impl Future<Output = Result<Value, CoinbaseError>> + Send;

    /// List accounts.
    fn accounts(&self) -> impl Future<Output = Result<Vec<Account>, CoinbaseError>> + Send;
}

impl CoinbaseClient for CoinbaseRestClient {
    async fn get_spot_price(&self, pair: &str) -> Result<Value, CoinbaseError> {
        CoinbaseRestClient::get_spot_price(self, pair).await
    }

    async fn spot_price(&self, pair: &str) -> Result<SpotPrice, CoinbaseError> {
        CoinbaseRestClient::spot_price(self, pair).await
    }

    async fn get_accounts(&self) -> Result<Value, CoinbaseError> {
        CoinbaseRestClient::get_accounts(self).await
    }

    async fn accounts(&self) -> Result<Vec<Account>, CoinbaseError> {
        CoinbaseRestClient::accounts(self).await
    }
}
