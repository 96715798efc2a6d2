//! Typed response models.
//!
//! Coinbase wraps every payload in a `{"data": ...}` envelope. The raw
//! endpoint methods return the decoded JSON untouched; these types back the
//! typed conveniences.

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::CoinbaseError;

/// The `{"data": ...}` envelope around a response payload.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataEnvelope<T> {
    /// The payload
    pub data: T,
    /// Pagination cursor for list endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: DeserializeOwned> DataEnvelope<T> {
    /// Decode an envelope from a JSON value returned by the client.
    pub fn from_value(value: Value) -> Result<Self, CoinbaseError> {
        serde_json::from_value(value)
            .map_err(|e| CoinbaseError::Decode(format!("Unexpected response shape: {e}")))
    }
}

/// Cursor pagination details.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Pagination {
    pub ending_before: Option<String>,
    pub starting_after: Option<String>,
    pub limit: Option<u32>,
    pub order: Option<String>,
    pub previous_uri: Option<String>,
    pub next_uri: Option<String>,
}

/// Spot price of a currency pair.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SpotPrice {
    /// Price of one unit of `base`, in `currency`
    pub amount: Decimal,
    /// Base currency (e.g. "BTC")
    #[serde(default)]
    pub base: Option<String>,
    /// Quote currency (e.g. "USD")
    #[serde(default)]
    pub currency: Option<String>,
}

/// An amount in a given currency.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Balance {
    pub amount: Decimal,
    pub currency: String,
}

/// Account currency, either a bare code or a detailed object.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AccountCurrency {
    Code(String),
    Detail {
        code: String,
        #[serde(default)]
        name: Option<String>,
    },
}

impl AccountCurrency {
    /// The currency code, whichever form the server used.
    pub fn code(&self) -> &str {
        match self {
            Self::Code(code) => code,
            Self::Detail { code, .. } => code,
        }
    }
}

/// A wallet or vault held by the authenticated user.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Account {
    /// Account identifier
    pub id: String,
    /// User-defined name
    #[serde(default)]
    pub name: Option<String>,
    /// Whether this is the primary account for its currency
    #[serde(default)]
    pub primary: bool,
    /// Account type (e.g. "wallet", "vault")
    #[serde(rename = "type", default)]
    pub account_type: Option<String>,
    /// Account currency
    pub currency: AccountCurrency,
    /// Current balance
    pub balance: Balance,
}
