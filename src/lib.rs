//! # faq-auth (FAQ admin credential core)
//!
//! Everything the FAQ admin backend needs to decide who is calling it.
//!
//! ## Passwords
//!
//! Passwords are stored as `hex(salt):hex(key)` where `key` is a 64-byte scrypt
//! derivation (`N = 2^14`, `r = 8`, `p = 1`) over a fresh 16-byte salt. The KDF
//! costs tens of milliseconds, so async callers use the `*_in_worker` variants.
//!
//! ## Tokens
//!
//! Access (15 minutes) and refresh (7 days) tokens are compact HS256 tokens:
//! `base64url(header).base64url(payload).base64url(hmac)`. Verification is
//! all-or-nothing; every failure collapses into [`Error::InvalidToken`].
//!
//! ## API keys
//!
//! Keys look like `faq_<64 hex>`. Only the SHA-256 digest and a short display
//! prefix are stored, so a leaked table cannot be replayed.

pub mod cli;
pub mod credentials;

pub use credentials::{
    ApiKeyManager, Error, PasswordHasher, Result, SigningSecret, TokenCodec, TokenIssuer,
};

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }
}
