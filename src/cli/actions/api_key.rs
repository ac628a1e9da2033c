use super::read_secret_line;
use crate::credentials::ApiKeyManager;
use anyhow::Result;
use secrecy::ExposeSecret;
use serde::Serialize;
use std::io::{BufRead, Write};
use tracing::info;

#[derive(Debug, Serialize)]
struct GeneratedKey<'a> {
    secret: &'a str,
    digest: &'a str,
    display_prefix: &'a str,
}

/// Generate a key and write secret, digest and display prefix as JSON.
/// This is the only time the secret is shown.
///
/// # Errors
/// Returns an error if the random source fails or output cannot be written.
pub fn generate<W: Write>(out: &mut W) -> Result<()> {
    let material = ApiKeyManager::new().generate()?;
    let generated = GeneratedKey {
        secret: material.secret.expose_secret(),
        digest: material.digest.as_str(),
        display_prefix: &material.display_prefix,
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&generated)?)?;
    info!(display_prefix = %material.display_prefix, "api key generated");
    Ok(())
}

/// Read a key from `input` and write its lookup digest.
///
/// # Errors
/// Returns an error if stdin is empty or output cannot be written.
pub fn digest<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<()> {
    let secret = read_secret_line(input)?;
    writeln!(out, "{}", ApiKeyManager::digest_of(secret.expose_secret()))?;
    Ok(())
}
