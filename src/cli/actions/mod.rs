pub mod api_key;
pub mod password;
pub mod token;

// The match over `Action` lives in `run` so this file stays a list of actions.
mod run;

use anyhow::{bail, Result};
use secrecy::SecretString;
use std::io::BufRead;

#[derive(Debug)]
pub enum Action {
    HashPassword,
    VerifyPassword(password::VerifyArgs),
    IssueToken(token::IssueArgs),
    VerifyToken(token::VerifyArgs),
    GenerateApiKey,
    ApiKeyDigest,
}

impl Action {
    /// Execute the action against stdin/stdout.
    /// # Errors
    /// Returns an error if the action fails or the credential is rejected.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}

/// Read one line from `input` as a secret, without its line terminator.
/// An empty line is a valid (empty) secret; end of input is not.
pub(crate) fn read_secret_line<R: BufRead>(input: &mut R) -> Result<SecretString> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("expected a line on stdin");
    }
    let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed_len);
    Ok(SecretString::from(line))
}
