//! Shared helpers: base64url JSON segments, constant-time comparison,
//! OS randomness and the wall clock.

use super::error::{Error, Result};
use base64ct::{Base64UrlUnpadded, Encoding};
use rand::{rngs::OsRng, RngCore};
use serde::{de::DeserializeOwned, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use subtle::ConstantTimeEq;

pub(crate) fn b64e_json<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

/// Decode a base64url JSON segment. `None` on any decoding or parse failure.
pub(crate) fn b64d_json<T: DeserializeOwned>(segment: &str) -> Option<T> {
    let bytes = Base64UrlUnpadded::decode_vec(segment).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Constant-time equality. Lengths are public, so a length mismatch returns early.
pub(crate) fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}

/// Fill `buf` from the OS CSPRNG.
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng.try_fill_bytes(buf).map_err(|_| Error::Entropy)
}

/// Seconds since the unix epoch. A clock set before 1970 reads as 0.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sample {
        name: String,
        n: u32,
    }

    #[test]
    fn json_segment_is_unpadded_url_safe() -> Result<()> {
        let segment = b64e_json(&Sample {
            name: "??>>".to_string(),
            n: 1,
        })?;
        assert!(!segment.contains('='));
        assert!(!segment.contains('+'));
        assert!(!segment.contains('/'));
        assert_eq!(
            b64d_json::<Sample>(&segment),
            Some(Sample {
                name: "??>>".to_string(),
                n: 1
            })
        );
        Ok(())
    }

    #[test]
    fn b64d_json_rejects_garbage() {
        assert_eq!(b64d_json::<Sample>("not base64!"), None);
        // valid base64url, not json
        assert_eq!(b64d_json::<Sample>("aGVsbG8"), None);
    }

    #[test]
    fn constant_time_eq_compares_content_and_length() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(constant_time_eq(b"", b""));
    }

    #[test]
    fn fill_random_produces_distinct_buffers() -> Result<()> {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        fill_random(&mut a)?;
        fill_random(&mut b)?;
        assert_ne!(a, b);
        Ok(())
    }

    #[test]
    fn unix_now_is_after_2023() {
        assert!(unix_now() > 1_700_000_000);
    }
}
