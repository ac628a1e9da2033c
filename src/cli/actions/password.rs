use super::read_secret_line;
use crate::credentials::{Error, PasswordHasher};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::info;

#[derive(Debug)]
pub struct VerifyArgs {
    pub stored: String,
}

/// Hash the password read from `input` and write the stored digest.
///
/// # Errors
/// Returns an error if stdin is empty or the random source fails.
pub async fn hash<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> Result<()> {
    let password = read_secret_line(input)?;
    let stored = PasswordHasher::default().hash_in_worker(password).await?;
    writeln!(out, "{stored}")?;
    info!("password digest created");
    Ok(())
}

/// Check the password read from `input` against `args.stored`.
///
/// # Errors
/// Returns `Error::InvalidCredentials` (after printing `invalid`) on mismatch.
pub async fn verify<R: BufRead, W: Write>(
    args: &VerifyArgs,
    input: &mut R,
    out: &mut W,
) -> Result<()> {
    let password = read_secret_line(input)?;
    let valid = PasswordHasher::default()
        .verify_in_worker(password, args.stored.clone())
        .await;

    if valid {
        writeln!(out, "valid")?;
        Ok(())
    } else {
        writeln!(out, "invalid")?;
        Err(Error::InvalidCredentials.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() -> Result<()> {
        let mut out = Vec::new();
        hash(&mut &b"hunter2\n"[..], &mut out).await?;
        let stored = String::from_utf8(out)?.trim_end().to_string();
        assert_eq!(stored.len(), 32 + 1 + 128);

        let args = VerifyArgs { stored };
        let mut out = Vec::new();
        verify(&args, &mut &b"hunter2\n"[..], &mut out).await?;
        assert_eq!(out, b"valid\n");

        let mut out = Vec::new();
        let result = verify(&args, &mut &b"HUNTER2\n"[..], &mut out).await;
        assert_eq!(out, b"invalid\n");
        assert!(matches!(
            result.map_err(|err| err.downcast::<Error>()),
            Err(Ok(Error::InvalidCredentials))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn verify_malformed_stored_is_invalid() {
        let args = VerifyArgs {
            stored: "not-a-digest".to_string(),
        };
        let mut out = Vec::new();
        assert!(verify(&args, &mut &b"hunter2\n"[..], &mut out).await.is_err());
        assert_eq!(out, b"invalid\n");
    }
}
