//! Ordered form parameters.

use serde::Serialize;

use crate::error::CoinbaseError;

/// Form parameters for a request, kept in insertion order.
///
/// The order matters: the encoded string is both the POST body and part of
/// the signature pre-image, so it must be reproducible.
///
/// ```rust
/// use coinbase_api_client::rest::FormParams;
///
/// let mut params = FormParams::new();
/// params.insert("limit", "25");
/// params.insert("order", "desc & asc");
/// assert_eq!(params.encode().unwrap(), "limit=25&order=desc+%26+asc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormParams(Vec<(String, String)>);

impl FormParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`.
    ///
    /// An existing key keeps its position and has its value replaced; a new key
    /// is appended.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Form-url-encode the parameters (`key=value` pairs joined by `&`).
    pub fn encode(&self) -> Result<String, CoinbaseError> {
        serde_urlencoded::to_string(self)
            .map_err(|e| CoinbaseError::Encode(format!("Failed to encode form parameters: {e}")))
    }
}

impl<K, V> FromIterator<(K, V)> for FormParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}
