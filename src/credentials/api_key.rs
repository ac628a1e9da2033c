//! Opaque API keys for service callers.
//!
//! A key is `faq_` followed by 64 hex characters of OS randomness. Only its
//! SHA-256 digest is stored; the store looks records up by digest. The display
//! prefix is for humans and plays no part in verification.

use super::encoding::{constant_time_eq, fill_random};
use super::error::{Error, Result};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};
use std::fmt;
use tracing::debug;

pub const API_KEY_TAG: &str = "faq_";
pub const API_KEY_RANDOM_BYTES: usize = 32;
pub const DISPLAY_PREFIX_HEX_CHARS: usize = 8;
pub const DISPLAY_ELLIPSIS: &str = "...";

/// Lowercase hex SHA-256 of an API key secret.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApiKeyDigest(String);

impl ApiKeyDigest {
    /// Wrap a digest read back from storage.
    #[must_use]
    pub fn from_stored(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Constant-time digest comparison.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl fmt::Display for ApiKeyDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A freshly generated key. `secret` is returned to the caller once and never stored.
#[derive(Debug)]
pub struct ApiKeyMaterial {
    pub secret: SecretString,
    pub digest: ApiKeyDigest,
    pub display_prefix: String,
}

/// An API key record as held by the external store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredApiKey {
    pub id: String,
    pub name: String,
    pub digest: ApiKeyDigest,
    pub display_prefix: String,
    pub is_active: bool,
}

/// Lookup seam for the store that persists API keys.
pub trait ApiKeyStore {
    fn find_by_digest(&self, digest: &ApiKeyDigest) -> Option<StoredApiKey>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ApiKeyManager;

impl ApiKeyManager {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Generate a new key.
    ///
    /// # Errors
    ///
    /// Returns `Error::Entropy` if the OS random source fails; callers treat that as fatal.
    pub fn generate(&self) -> Result<ApiKeyMaterial> {
        let mut random = [0u8; API_KEY_RANDOM_BYTES];
        fill_random(&mut random)?;
        let random_hex = hex::encode(random);

        let secret = format!("{API_KEY_TAG}{random_hex}");
        let digest = Self::digest_of(&secret);
        let display_prefix = display_prefix(&random_hex);

        Ok(ApiKeyMaterial {
            secret: SecretString::from(secret),
            digest,
            display_prefix,
        })
    }

    /// SHA-256 of the presented secret, as stored by the key store.
    #[must_use]
    pub fn digest_of(secret: &str) -> ApiKeyDigest {
        ApiKeyDigest(hex::encode(Sha256::digest(secret.as_bytes())))
    }

    /// Resolve a presented key to its active stored record.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidApiKey` if the key is unknown, revoked, or the
    /// record's digest does not match.
    pub fn authenticate<S: ApiKeyStore + ?Sized>(
        &self,
        store: &S,
        presented: &SecretString,
    ) -> Result<StoredApiKey> {
        let digest = Self::digest_of(presented.expose_secret());
        let Some(record) = store.find_by_digest(&digest) else {
            debug!("api key rejected: unknown digest");
            return Err(Error::InvalidApiKey);
        };
        if !record.digest.matches(&digest) {
            debug!(key_id = %record.id, "api key rejected: digest mismatch");
            return Err(Error::InvalidApiKey);
        }
        if !record.is_active {
            debug!(key_id = %record.id, "api key rejected: inactive");
            return Err(Error::InvalidApiKey);
        }
        Ok(record)
    }
}

fn display_prefix(random_hex: &str) -> String {
    let visible = random_hex.get(..DISPLAY_PREFIX_HEX_CHARS).unwrap_or(random_hex);
    format!("{API_KEY_TAG}{visible}{DISPLAY_ELLIPSIS}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        keys: HashMap<String, StoredApiKey>,
    }

    impl MemoryStore {
        fn insert(&mut self, id: &str, material: &ApiKeyMaterial, is_active: bool) {
            self.keys.insert(
                material.digest.as_str().to_string(),
                StoredApiKey {
                    id: id.to_string(),
                    name: format!("{id} key"),
                    digest: material.digest.clone(),
                    display_prefix: material.display_prefix.clone(),
                    is_active,
                },
            );
        }
    }

    impl ApiKeyStore for MemoryStore {
        fn find_by_digest(&self, digest: &ApiKeyDigest) -> Option<StoredApiKey> {
            self.keys.get(digest.as_str()).cloned()
        }
    }

    #[test]
    fn generated_key_format() -> Result<()> {
        let material = ApiKeyManager::new().generate()?;
        let secret = material.secret.expose_secret();

        let random_hex = secret.strip_prefix(API_KEY_TAG).ok_or(Error::InvalidApiKey)?;
        assert_eq!(random_hex.len(), 64);
        assert!(random_hex
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));

        assert_eq!(material.digest.as_str().len(), 64);
        assert_eq!(
            material.display_prefix,
            format!("faq_{}...", &random_hex[..8])
        );
        Ok(())
    }

    #[test]
    fn digest_matches_generation() -> Result<()> {
        let material = ApiKeyManager::new().generate()?;
        let recomputed = ApiKeyManager::digest_of(material.secret.expose_secret());
        assert_eq!(recomputed, material.digest);
        assert!(recomputed.matches(&material.digest));
        Ok(())
    }

    #[test]
    fn generate_is_unique() -> Result<()> {
        let manager = ApiKeyManager::new();
        let a = manager.generate()?;
        let b = manager.generate()?;
        assert_ne!(a.secret.expose_secret(), b.secret.expose_secret());
        assert_ne!(a.digest, b.digest);
        assert_ne!(a.display_prefix, b.display_prefix);
        Ok(())
    }

    #[test]
    fn display_prefix_reveals_only_eight_hex_chars() -> Result<()> {
        let material = ApiKeyManager::new().generate()?;
        let shown = material
            .display_prefix
            .strip_prefix(API_KEY_TAG)
            .and_then(|rest| rest.strip_suffix(DISPLAY_ELLIPSIS))
            .ok_or(Error::InvalidApiKey)?;
        assert_eq!(shown.len(), DISPLAY_PREFIX_HEX_CHARS);
        assert!(material
            .secret
            .expose_secret()
            .starts_with(&format!("{API_KEY_TAG}{shown}")));
        Ok(())
    }

    #[test]
    fn digest_of_is_plain_sha256_hex() {
        // sha256("abc")
        assert_eq!(
            ApiKeyManager::digest_of("abc").as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn debug_never_prints_secret() -> Result<()> {
        let material = ApiKeyManager::new().generate()?;
        let debug = format!("{material:?}");
        assert!(!debug.contains(material.secret.expose_secret()));
        Ok(())
    }

    #[test]
    fn authenticate_accepts_active_key() -> Result<()> {
        let manager = ApiKeyManager::new();
        let material = manager.generate()?;
        let mut store = MemoryStore::default();
        store.insert("svc-1", &material, true);

        let record = manager.authenticate(&store, &material.secret)?;
        assert_eq!(record.id, "svc-1");
        Ok(())
    }

    #[test]
    fn authenticate_rejects_unknown_and_inactive() -> Result<()> {
        let manager = ApiKeyManager::new();
        let active = manager.generate()?;
        let revoked = manager.generate()?;
        let mut store = MemoryStore::default();
        store.insert("svc-1", &active, true);
        store.insert("svc-2", &revoked, false);

        assert!(matches!(
            manager.authenticate(&store, &revoked.secret),
            Err(Error::InvalidApiKey)
        ));
        let unknown = SecretString::from(format!("{API_KEY_TAG}{}", "0".repeat(64)));
        assert!(matches!(
            manager.authenticate(&store, &unknown),
            Err(Error::InvalidApiKey)
        ));
        Ok(())
    }

    #[test]
    fn authenticate_rejects_store_returning_wrong_record() -> Result<()> {
        struct Confused(StoredApiKey);
        impl ApiKeyStore for Confused {
            fn find_by_digest(&self, _digest: &ApiKeyDigest) -> Option<StoredApiKey> {
                Some(self.0.clone())
            }
        }

        let manager = ApiKeyManager::new();
        let material = manager.generate()?;
        let store = Confused(StoredApiKey {
            id: "other".to_string(),
            name: "other".to_string(),
            digest: ApiKeyDigest::from_stored("00".repeat(32)),
            display_prefix: "faq_00000000...".to_string(),
            is_active: true,
        });
        assert!(matches!(
            manager.authenticate(&store, &material.secret),
            Err(Error::InvalidApiKey)
        ));
        Ok(())
    }
}
