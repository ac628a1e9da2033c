//! Access and refresh token issuance.
//!
//! Access tokens are short lived and travel with every request. Refresh tokens
//! live for a week and are only presented to mint new access tokens. Nothing is
//! recorded server side: a token stays valid until `exp` even after logout.

use super::encoding::unix_now;
use super::error::{Error, Result};
use super::secret::SigningSecret;
use super::token::{TokenCodec, TokenPayload, TokenType};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 15 * 60;
pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

impl TokenType {
    #[must_use]
    pub const fn ttl_seconds(self) -> i64 {
        match self {
            Self::Access => ACCESS_TOKEN_TTL_SECONDS,
            Self::Refresh => REFRESH_TOKEN_TTL_SECONDS,
        }
    }
}

/// Tokens handed out at login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub access_expires_in: i64,
    pub refresh_expires_in: i64,
}

#[derive(Debug)]
pub struct TokenIssuer {
    codec: TokenCodec,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    #[must_use]
    pub fn from_secret(secret: SigningSecret) -> Self {
        Self::new(TokenCodec::new(secret))
    }

    /// # Errors
    ///
    /// Returns an error if the token cannot be encoded.
    pub fn issue_access(&self, subject: &str, email: &str) -> Result<String> {
        self.issue_at(TokenType::Access, subject, email, unix_now())
    }

    /// # Errors
    ///
    /// Returns an error if the token cannot be encoded.
    pub fn issue_refresh(&self, subject: &str, email: &str) -> Result<String> {
        self.issue_at(TokenType::Refresh, subject, email, unix_now())
    }

    /// Issue both tokens with the same `iat`.
    ///
    /// # Errors
    ///
    /// Returns an error if either token cannot be encoded.
    pub fn issue_pair(&self, subject: &str, email: &str) -> Result<TokenPair> {
        let now = unix_now();
        Ok(TokenPair {
            access_token: self.issue_at(TokenType::Access, subject, email, now)?,
            refresh_token: self.issue_at(TokenType::Refresh, subject, email, now)?,
            access_expires_in: ACCESS_TOKEN_TTL_SECONDS,
            refresh_expires_in: REFRESH_TOKEN_TTL_SECONDS,
        })
    }

    /// Issue a token of `token_type` as of `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// Returns an error if the token cannot be encoded.
    pub fn issue_at(
        &self,
        token_type: TokenType,
        subject: &str,
        email: &str,
        now: i64,
    ) -> Result<String> {
        let payload = TokenPayload {
            sub: subject.to_string(),
            email: email.to_string(),
            token_type,
            iat: now,
            exp: now.saturating_add(token_type.ttl_seconds()),
        };
        self.codec.sign(&payload)
    }

    /// # Errors
    ///
    /// Returns `Error::InvalidToken` unless the token is a live access token.
    pub fn verify_access(&self, token: &str) -> Result<TokenPayload> {
        self.verify_at(TokenType::Access, token, unix_now())
    }

    /// # Errors
    ///
    /// Returns `Error::InvalidToken` unless the token is a live refresh token.
    pub fn verify_refresh(&self, token: &str) -> Result<TokenPayload> {
        self.verify_at(TokenType::Refresh, token, unix_now())
    }

    /// Verify against an explicit clock, requiring `expected` as the token type.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidToken` on any failure, type mismatch included.
    pub fn verify_at(&self, expected: TokenType, token: &str, now: i64) -> Result<TokenPayload> {
        let payload = self.codec.verify_at(token, now)?;
        if payload.token_type != expected {
            debug!(
                expected = %expected,
                actual = %payload.token_type,
                "token rejected: type mismatch"
            );
            return Err(Error::InvalidToken);
        }
        Ok(payload)
    }

    /// Mint a new access token from a refresh token. The refresh token is not rotated.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidToken` unless `refresh_token` is a live refresh token.
    pub fn refresh_access(&self, refresh_token: &str) -> Result<String> {
        let payload = self.verify_refresh(refresh_token)?;
        self.issue_access(&payload.sub, &payload.email)
    }
}
