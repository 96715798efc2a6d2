//! Coinbase REST API client.
//!
//! Public requests go out unsigned; private requests carry a nonce and the
//! `CB-ACCESS-*` authentication headers.
//!
//! # Trait-based API
//!
//! The [`CoinbaseClient`] trait abstracts the REST operations so applications
//! can inject the real client or a mock.

mod account;
mod client;
mod endpoints;
mod market;
mod params;
mod traits;
mod transport;
pub mod types;

pub use client::{CoinbaseRestClient, CoinbaseRestClientBuilder, NONCE_PARAM, PrivateRequest};
pub use endpoints::*;
pub use params::FormParams;
pub use traits::CoinbaseClient;
pub use transport::{CONNECT_TIMEOUT, REQUEST_TIMEOUT, Transport, decode_json};
