use super::{api_key, password, token, Action};
use anyhow::Result;
use std::io::{self, Write};

pub(super) async fn execute(action: Action) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout().lock();

    match action {
        Action::HashPassword => password::hash(&mut input, &mut out).await?,
        Action::VerifyPassword(args) => password::verify(&args, &mut input, &mut out).await?,
        Action::IssueToken(args) => token::issue(args, &mut out)?,
        Action::VerifyToken(args) => token::verify(args, &mut out)?,
        Action::GenerateApiKey => api_key::generate(&mut out)?,
        Action::ApiKeyDigest => api_key::digest(&mut input, &mut out)?,
    }

    out.flush()?;
    Ok(())
}
