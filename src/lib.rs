//! # Coinbase Client
//!
//! An async Rust client library for the Coinbase REST API.
//!
//! ## Features
//!
//! - Public market data (spot prices)
//! - Private account endpoints signed with `CB-ACCESS-*` headers
//! - Strongly-typed, validated client configuration
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use coinbase_api_client::config::ClientConfig;
//! use coinbase_api_client::rest::CoinbaseRestClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://api.coinbase.com", "v2")?;
//!     let client = CoinbaseRestClient::new(config)?;
//!     let price = client.spot_price("BTC-USD").await?;
//!     println!("BTC-USD: {}", price.amount);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod rest;

// Re-export commonly used types at crate root
pub use config::ClientConfig;
pub use error::CoinbaseError;
pub use rest::{CoinbaseClient, CoinbaseRestClient};

/// Result type alias using CoinbaseError
pub type Result<T> = std::result::Result<T, CoinbaseError>;
