use crate::credentials::{SigningSecret, TokenIssuer, TokenType};
use anyhow::Result;
use std::io::Write;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    Single(TokenType),
    Pair,
}

#[derive(Debug)]
pub struct IssueArgs {
    pub secret: SigningSecret,
    pub subject: String,
    pub email: String,
    pub kind: IssueKind,
}

#[derive(Debug)]
pub struct VerifyArgs {
    pub secret: SigningSecret,
    pub expected: TokenType,
    pub token: String,
}

/// Issue a token (or a pair, as JSON) and write it to `out`.
///
/// # Errors
/// Returns an error if encoding or writing fails.
pub fn issue<W: Write>(args: IssueArgs, out: &mut W) -> Result<()> {
    let IssueArgs {
        secret,
        subject,
        email,
        kind,
    } = args;
    let issuer = TokenIssuer::from_secret(secret);

    match kind {
        IssueKind::Single(TokenType::Access) => {
            writeln!(out, "{}", issuer.issue_access(&subject, &email)?)?;
        }
        IssueKind::Single(TokenType::Refresh) => {
            writeln!(out, "{}", issuer.issue_refresh(&subject, &email)?)?;
        }
        IssueKind::Pair => {
            let pair = issuer.issue_pair(&subject, &email)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&pair)?)?;
        }
    }

    info!(subject = %subject, kind = ?kind, "token issued");
    Ok(())
}

/// Verify `args.token` and write its payload as JSON.
///
/// # Errors
/// Returns `Error::InvalidToken` if the token is rejected for any reason.
pub fn verify<W: Write>(args: VerifyArgs, out: &mut W) -> Result<()> {
    let issuer = TokenIssuer::from_secret(args.secret);
    let payload = match args.expected {
        TokenType::Access => issuer.verify_access(&args.token)?,
        TokenType::Refresh => issuer.verify_refresh(&args.token)?,
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
    Ok(())
}
