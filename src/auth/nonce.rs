//! Nonce generation for Coinbase API authentication.
//!
//! Private requests carry a `nonce` form parameter built from the wall clock at
//! microsecond resolution. Its decimal form is the whole UNIX seconds followed by
//! the six-digit, zero-padded microseconds of the current second, so the
//! microsecond component occupies the low-order digits.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for providing nonces for authenticated requests.
///
/// The nonce must be strictly increasing for each request.
pub trait NonceProvider: Send + Sync {
    /// Generate the next nonce value.
    ///
    /// This value must be greater than any previously returned value.
    fn next_nonce(&self) -> u64;
}

/// A nonce provider producing `{seconds}{microseconds:06}` nonces.
///
/// Seconds and microseconds are read separately from the clock and then
/// combined. An atomic high-water mark keeps the sequence strictly increasing
/// even when two reads land in the same microsecond or the clock steps back.
pub struct MicrosecondNonce {
    last_nonce: AtomicU64,
}

impl MicrosecondNonce {
    /// Create a new microsecond nonce provider.
    pub fn new() -> Self {
        Self {
            last_nonce: AtomicU64::new(0),
        }
    }

    /// Combine whole seconds and the microseconds of that second.
    ///
    /// The decimal rendering equals `format!("{seconds}{micros:06}")` for any
    /// non-zero `seconds`.
    pub fn compose(seconds: u64, micros: u32) -> u64 {
        seconds
            .saturating_mul(1_000_000)
            .saturating_add(u64::from(micros % 1_000_000))
    }

    fn current_time_nonce() -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::compose(now.as_secs(), now.subsec_micros())
    }
}

impl Default for MicrosecondNonce {
    fn default() -> Self {
        Self::new()
    }
}

impl NonceProvider for MicrosecondNonce {
    fn next_nonce(&self) -> u64 {
        let time_nonce = Self::current_time_nonce();

        loop {
            let last = self.last_nonce.load(Ordering::SeqCst);
            let next = time_nonce.max(last + 1);

            if self
                .last_nonce
                .compare_exchange(last, next, Ordering::SeqCst, Ordering::SeqCst)
                .is_ok()
            {
                return next;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::thread;

    #[test]
    fn test_compose_matches_concatenation() {
        assert_eq!(
            MicrosecondNonce::compose(1_700_000_000, 42).to_string(),
            format!("{}{:06}", 1_700_000_000u64, 42)
        );
        assert_eq!(
            MicrosecondNonce::compose(1_700_000_000, 999_999).to_string(),
            "1700000000999999"
        );
        assert_eq!(
            MicrosecondNonce::compose(1_700_000_001, 0).to_string(),
            "1700000001000000"
        );
    }

    #[test]
    fn test_nonce_tracks_wall_clock() {
        let provider = MicrosecondNonce::new();
        let before = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let nonce = provider.next_nonce();
        // Sixteen digits: ten for seconds, six for microseconds.
        assert_eq!(nonce.to_string().len(), 16);
        assert!(nonce / 1_000_000 >= before);
    }

    #[test]
    fn test_nonce_strictly_increasing() {
        let provider = MicrosecondNonce::new();

        let mut last = 0u64;
        for _ in 0..1000 {
            let nonce = provider.next_nonce();
            assert!(nonce > last, "Nonce must be strictly increasing");
            last = nonce;
        }
    }

    #[test]
    fn test_nonce_unique_across_threads() {
        let provider = std::sync::Arc::new(MicrosecondNonce::new());
        let mut handles = vec![];

        for _ in 0..4 {
            let p = provider.clone();
            handles.push(thread::spawn(move || {
                let mut nonces = Vec::new();
                for _ in 0..1000 {
                    nonces.push(p.next_nonce());
                }
                nonces
            }));
        }

        let mut all_nonces = HashSet::new();
        for handle in handles {
            for nonce in handle.join().unwrap() {
                assert!(
                    all_nonces.insert(nonce),
                    "Nonce must be unique across threads"
                );
            }
        }
    }
}
