//! Private account endpoints (authentication required).

use serde_json::Value;

use crate::error::CoinbaseError;
use crate::rest::client::CoinbaseRestClient;
use crate::rest::endpoints::private;
use crate::rest::params::FormParams;
use crate::rest::types::{Account, DataEnvelope};

impl CoinbaseRestClient {
    /// List the accounts of the authenticated user.
    ///
    /// Issues a signed `POST {host}/{version}/accounts` and returns the decoded
    /// JSON as sent by the server.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use coinbase_api_client::config::ClientConfig;
    /// use coinbase_api_client::rest::CoinbaseRestClient;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = CoinbaseRestClient::new(ClientConfig::from_env()?)?;
    ///     let accounts = client.get_accounts().await?;
    ///     println!("{}", accounts);
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_accounts(&self) -> Result<Value, CoinbaseError> {
        self.query_private(private::ACCOUNTS, FormParams::new())
            .await
    }

    /// List accounts as typed [`Account`] values.
    pub async fn accounts(&self) -> Result<Vec<Account>, CoinbaseError> {
        let value = self.get_accounts().await?;
        Ok(DataEnvelope::from_value(value)?.data)
    }
}
