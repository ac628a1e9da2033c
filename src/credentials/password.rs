//! Salted scrypt password digests.
//!
//! Stored format: `hex(salt):hex(derived)`, a 16 byte salt and a 64 byte key,
//! 32 and 128 hex characters respectively. The scrypt cost is not encoded, so a
//! digest only verifies with a hasher built with the same cost.

use super::encoding::{constant_time_eq, fill_random};
use super::error::{Error, Result};
use scrypt::Params;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};

pub const SALT_LEN: usize = 16;
pub const DERIVED_KEY_LEN: usize = 64;

/// scrypt `log2(N)`, `r`, `p`: N = 16384, r = 8, p = 1 (~16 MiB, tens of ms per call).
pub const DEFAULT_LOG_N: u8 = 14;
pub const DEFAULT_R: u32 = 8;
pub const DEFAULT_P: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    log_n: u8,
    r: u32,
    p: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            log_n: DEFAULT_LOG_N,
            r: DEFAULT_R,
            p: DEFAULT_P,
        }
    }
}

impl PasswordHasher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a hasher with a custom scrypt cost.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if scrypt rejects the parameters.
    pub fn with_cost(log_n: u8, r: u32, p: u32) -> Result<Self> {
        Params::new(log_n, r, p, DERIVED_KEY_LEN)
            .map_err(|err| Error::Configuration(format!("invalid scrypt cost: {err}")))?;
        Ok(Self { log_n, r, p })
    }

    /// Hash a password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `Error::Entropy` if the OS random source fails.
    pub fn hash(&self, password: &str) -> Result<String> {
        let mut salt = [0u8; SALT_LEN];
        fill_random(&mut salt)?;
        let derived = self.derive(password.as_bytes(), &salt)?;
        Ok(format!("{}:{}", hex::encode(salt), hex::encode(derived)))
    }

    /// Check a password against a stored digest. Malformed digests return `false`.
    #[must_use]
    pub fn verify(&self, password: &str, stored: &str) -> bool {
        let Some((salt, expected)) = parse_stored(stored) else {
            debug!("stored password digest is malformed");
            return false;
        };

        match self.derive(password.as_bytes(), &salt) {
            Ok(derived) => constant_time_eq(&derived, &expected),
            Err(err) => {
                error!("password derivation failed: {err}");
                false
            }
        }
    }

    /// Like [`Self::verify`], as a typed rejection.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidCredentials` when the password does not match.
    pub fn check(&self, password: &str, stored: &str) -> Result<()> {
        if self.verify(password, stored) {
            Ok(())
        } else {
            Err(Error::InvalidCredentials)
        }
    }

    /// Run [`Self::hash`] on the blocking pool so the async runtime keeps serving requests.
    ///
    /// # Errors
    ///
    /// Returns the hashing error, or `Error::Worker` if the blocking task panicked or was cancelled.
    pub async fn hash_in_worker(&self, password: SecretString) -> Result<String> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(password.expose_secret()))
            .await
            .map_err(|err| Error::Worker(err.to_string()))?
    }

    /// Run [`Self::verify`] on the blocking pool. A failed worker counts as a mismatch.
    pub async fn verify_in_worker(&self, password: SecretString, stored: String) -> bool {
        let hasher = *self;
        match tokio::task::spawn_blocking(move || {
            hasher.verify(password.expose_secret(), &stored)
        })
        .await
        {
            Ok(valid) => valid,
            Err(err) => {
                error!("password verification worker failed: {err}");
                false
            }
        }
    }

    fn derive(&self, password: &[u8], salt: &[u8]) -> Result<[u8; DERIVED_KEY_LEN]> {
        let params = Params::new(self.log_n, self.r, self.p, DERIVED_KEY_LEN)
            .map_err(|_| Error::KeyDerivation)?;
        let mut derived = [0u8; DERIVED_KEY_LEN];
        scrypt::scrypt(password, salt, &params, &mut derived).map_err(|_| Error::KeyDerivation)?;
        Ok(derived)
    }
}

fn parse_stored(stored: &str) -> Option<(Vec<u8>, Vec<u8>)> {
    let (salt_hex, digest_hex) = stored.split_once(':')?;
    let salt = hex::decode(salt_hex).ok()?;
    let digest = hex::decode(digest_hex).ok()?;
    if salt.len() != SALT_LEN || digest.len() != DERIVED_KEY_LEN {
        return None;
    }
    Some((salt, digest))
}
