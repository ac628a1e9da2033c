//! Credential core: password digests, signed access/refresh tokens and API keys.
//!
//! Everything here is synchronous and stateless apart from the injected
//! [`SigningSecret`]. Password derivation is deliberately slow; async callers
//! should use the `*_in_worker` variants on [`PasswordHasher`].

mod api_key;
mod encoding;
mod error;
mod issuer;
mod password;
mod secret;
mod token;

pub use api_key::{
    ApiKeyDigest, ApiKeyManager, ApiKeyMaterial, ApiKeyStore, StoredApiKey, API_KEY_TAG,
    DISPLAY_PREFIX_HEX_CHARS,
};
pub use error::{Error, Result};
pub use issuer::{TokenIssuer, TokenPair, ACCESS_TOKEN_TTL_SECONDS, REFRESH_TOKEN_TTL_SECONDS};
pub use password::{PasswordHasher, DERIVED_KEY_LEN, SALT_LEN};
pub use secret::{SigningSecret, RECOMMENDED_SECRET_BYTES};
pub use token::{TokenCodec, TokenHeader, TokenPayload, TokenType};
