//! Signing secret provisioning.

use super::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use std::env;
use tracing::warn;

/// Secrets shorter than this are accepted but logged, HMAC-SHA256 wants a full block of key.
pub const RECOMMENDED_SECRET_BYTES: usize = 32;

/// HMAC key used to sign and verify tokens. Loaded once at startup, read-only afterwards.
#[derive(Debug)]
pub struct SigningSecret(SecretString);

impl SigningSecret {
    /// Wrap a configured secret.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the secret is empty or whitespace only.
    pub fn new(secret: SecretString) -> Result<Self> {
        let len = secret.expose_secret().len();
        if secret.expose_secret().trim().is_empty() {
            return Err(Error::Configuration(
                "token signing secret must not be empty".to_string(),
            ));
        }
        if len < RECOMMENDED_SECRET_BYTES {
            warn!(
                len,
                recommended = RECOMMENDED_SECRET_BYTES,
                "token signing secret is shorter than recommended"
            );
        }
        Ok(Self(secret))
    }

    /// Read the secret from an environment variable. There is no default.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the variable is unset, not unicode, or empty.
    pub fn from_env(var: &str) -> Result<Self> {
        let value = env::var(var).map_err(|err| match err {
            env::VarError::NotPresent => Error::Configuration(format!("{var} is not set")),
            env::VarError::NotUnicode(_) => {
                Error::Configuration(format!("{var} is not valid unicode"))
            }
        })?;
        Self::new(SecretString::from(value))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.expose_secret().as_bytes()
    }
}
