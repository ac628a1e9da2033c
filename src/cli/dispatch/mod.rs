//! Map parsed arguments to an [`Action`].
//!
//! Token subcommands need the signing secret; it is resolved here so a missing
//! secret aborts before any work is done.

use crate::cli::actions::{password, token, Action};
use crate::cli::commands::{
    secret, ARG_EMAIL, ARG_STORED, ARG_SUBJECT, ARG_TOKEN, ARG_TYPE, CMD_API_KEY_DIGEST,
    CMD_GENERATE_API_KEY, CMD_HASH_PASSWORD, CMD_ISSUE_TOKEN, CMD_VERIFY_PASSWORD,
    CMD_VERIFY_TOKEN,
};
use crate::credentials::TokenType;
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;

/// Map validated CLI matches to an action.
///
/// # Errors
/// Returns an error if a required argument or the signing secret is missing.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let (name, sub) = matches.subcommand().context("missing subcommand")?;

    match name {
        CMD_HASH_PASSWORD => Ok(Action::HashPassword),
        CMD_VERIFY_PASSWORD => Ok(Action::VerifyPassword(password::VerifyArgs {
            stored: required(sub, ARG_STORED)?,
        })),
        CMD_ISSUE_TOKEN => {
            let kind = match required(sub, ARG_TYPE)?.as_str() {
                "access" => token::IssueKind::Single(TokenType::Access),
                "refresh" => token::IssueKind::Single(TokenType::Refresh),
                "pair" => token::IssueKind::Pair,
                other => return Err(anyhow!("unsupported token type: {other}")),
            };
            Ok(Action::IssueToken(token::IssueArgs {
                secret: secret::parse(sub).context("token signing secret")?,
                subject: required(sub, ARG_SUBJECT)?,
                email: required(sub, ARG_EMAIL)?,
                kind,
            }))
        }
        CMD_VERIFY_TOKEN => {
            let expected = match required(sub, ARG_TYPE)?.as_str() {
                "access" => TokenType::Access,
                "refresh" => TokenType::Refresh,
                other => return Err(anyhow!("unsupported token type: {other}")),
            };
            Ok(Action::VerifyToken(token::VerifyArgs {
                secret: secret::parse(sub).context("token signing secret")?,
                expected,
                token: required(sub, ARG_TOKEN)?,
            }))
        }
        CMD_GENERATE_API_KEY => Ok(Action::GenerateApiKey),
        CMD_API_KEY_DIGEST => Ok(Action::ApiKeyDigest),
        other => Err(anyhow!("unknown subcommand: {other}")),
    }
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .with_context(|| format!("missing required argument: --{id}"))
}
