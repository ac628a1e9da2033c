use thiserror::Error;

/// Errors produced by the credential core.
///
/// The three rejection variants are intentionally coarse: a caller can tell
/// that a credential was refused, never which check refused it.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid api key")]
    InvalidApiKey,
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("secure random source unavailable")]
    Entropy,
    #[error("key derivation failed")]
    KeyDerivation,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("worker task failed: {0}")]
    Worker(String),
}

impl Error {
    /// True when the error is an authorization rejection (HTTP 401 at the edge),
    /// false for internal or startup failures.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::InvalidCredentials | Self::InvalidToken | Self::InvalidApiKey
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejections_are_flagged() {
        assert!(Error::InvalidCredentials.is_rejection());
        assert!(Error::InvalidToken.is_rejection());
        assert!(Error::InvalidApiKey.is_rejection());
        assert!(!Error::Configuration("missing".to_string()).is_rejection());
        assert!(!Error::Entropy.is_rejection());
        assert!(!Error::KeyDerivation.is_rejection());
    }

    #[test]
    fn rejection_messages_do_not_leak_cause() {
        assert_eq!(Error::InvalidToken.to_string(), "invalid token");
        assert_eq!(Error::InvalidCredentials.to_string(), "invalid credentials");
    }
}
