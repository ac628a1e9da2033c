//! Compact HS256 tokens: `base64url(header).base64url(payload).base64url(hmac)`.

use super::encoding::{b64d_json, b64e_json, constant_time_eq, unix_now};
use super::error::{Error, Result};
use super::secret::SigningSecret;
use base64ct::{Base64UrlUnpadded, Encoding};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

pub const ALG_HS256: &str = "HS256";
pub const TYP_JWT: &str = "JWT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl TokenHeader {
    fn hs256() -> Self {
        Self {
            alg: ALG_HS256.to_string(),
            typ: TYP_JWT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Access => "access",
            Self::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token claims. Signed, not encrypted: anyone holding the token can read them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPayload {
    pub sub: String,
    pub email: String,
    #[serde(rename = "type")]
    pub token_type: TokenType,
    pub iat: i64,
    pub exp: i64,
}

/// Signs and verifies tokens with an injected [`SigningSecret`].
#[derive(Debug)]
pub struct TokenCodec {
    secret: SigningSecret,
}

impl TokenCodec {
    #[must_use]
    pub fn new(secret: SigningSecret) -> Self {
        Self { secret }
    }

    /// Sign a payload. The output is deterministic for a given payload and secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the header or payload cannot be encoded as JSON.
    pub fn sign(&self, payload: &TokenPayload) -> Result<String> {
        let header_b64 = b64e_json(&TokenHeader::hs256())?;
        let payload_b64 = b64e_json(payload)?;
        let signing_input = format!("{header_b64}.{payload_b64}");
        let signature_b64 = self.signature(&signing_input)?;
        Ok(format!("{signing_input}.{signature_b64}"))
    }

    /// Verify a token against the current clock.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidToken` for every failure: structure, signature, payload or expiry.
    pub fn verify(&self, token: &str) -> Result<TokenPayload> {
        self.verify_at(token, unix_now())
    }

    /// Verify a token against `now` (unix seconds). A token is live while `exp > now`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidToken` for every failure: structure, signature, payload or expiry.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<TokenPayload> {
        match self.check(token, now) {
            Ok(payload) => Ok(payload),
            Err(reason) => {
                debug!(reason, "token rejected");
                Err(Error::InvalidToken)
            }
        }
    }

    // The reason never leaves this module except through the debug log.
    fn check(&self, token: &str, now: i64) -> std::result::Result<TokenPayload, &'static str> {
        let mut parts = token.split('.');
        let (Some(header_b64), Some(payload_b64), Some(signature_b64), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err("expected three segments");
        };
        if header_b64.is_empty() || payload_b64.is_empty() || signature_b64.is_empty() {
            return Err("empty segment");
        }

        let expected = self
            .signature(&format!("{header_b64}.{payload_b64}"))
            .map_err(|_| "mac unavailable")?;
        if !constant_time_eq(expected.as_bytes(), signature_b64.as_bytes()) {
            return Err("signature mismatch");
        }

        let header: TokenHeader = b64d_json(header_b64).ok_or("malformed header")?;
        if header.alg != ALG_HS256 {
            return Err("unsupported algorithm");
        }

        let payload: TokenPayload = b64d_json(payload_b64).ok_or("malformed payload")?;
        if payload.exp <= now {
            return Err("expired");
        }

        Ok(payload)
    }

    fn signature(&self, signing_input: &str) -> Result<String> {
        let mut mac = <HmacSha256 as Mac>::new_from_slice(self.secret.as_bytes())
            .map_err(|err| Error::Configuration(format!("signing secret rejected: {err}")))?;
        mac.update(signing_input.as_bytes());
        Ok(Base64UrlUnpadded::encode_string(&mac.finalize().into_bytes()))
    }
}
