//! Authentication module for the Coinbase API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - Microsecond nonce generation for replay attack prevention
//! - `CB-ACCESS-SIGN` signature generation for private requests

mod credentials;
mod nonce;
mod signature;

pub use credentials::Credentials;
pub use nonce::{MicrosecondNonce, NonceProvider};
pub use signature::{
    CB_ACCESS_KEY, CB_ACCESS_SIGN, CB_ACCESS_TIMESTAMP, SignedHeaders, sign_request,
};
