use crate::credentials::{Error, SigningSecret};
use clap::{Arg, ArgMatches, Command};
use secrecy::SecretString;

pub const ARG_TOKEN_SECRET: &str = "token-secret";
pub const ENV_TOKEN_SECRET: &str = "FAQ_AUTH_TOKEN_SECRET";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_TOKEN_SECRET)
            .long(ARG_TOKEN_SECRET)
            .help("HMAC secret used to sign and verify tokens")
            .env(ENV_TOKEN_SECRET)
            .hide_env_values(true)
            .global(true),
    )
}

/// Build the signing secret from `--token-secret` / `FAQ_AUTH_TOKEN_SECRET`.
///
/// # Errors
/// Returns `Error::Configuration` if the secret is missing or empty.
pub fn parse(matches: &ArgMatches) -> Result<SigningSecret, Error> {
    let value = matches.get_one::<String>(ARG_TOKEN_SECRET).ok_or_else(|| {
        Error::Configuration(format!(
            "missing required argument: --{ARG_TOKEN_SECRET} (or {ENV_TOKEN_SECRET})"
        ))
    })?;
    SigningSecret::new(SecretString::from(value.clone()))
}
