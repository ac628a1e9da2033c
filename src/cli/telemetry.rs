use anyhow::Result;
use std::io;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

/// Build the filter: `RUST_LOG` wins, otherwise `verbosity_level` (default `ERROR`).
fn filter(verbosity_level: Option<Level>) -> Result<EnvFilter> {
    let verbosity_level = verbosity_level.unwrap_or(Level::ERROR);

    Ok(EnvFilter::builder()
        .with_default_directive(verbosity_level.into())
        .from_env_lossy()
        .add_directive("tokio=error".parse()?))
}

/// Initialize logging to stderr. Stdout is reserved for command output.
///
/// # Errors
///
/// Returns an error if a directive fails to parse or a global subscriber is already set
pub fn init(verbosity_level: Option<Level>) -> Result<()> {
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false)
        .compact();

    let subscriber = Registry::default()
        .with(fmt_layer)
        .with(filter(verbosity_level)?);
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
