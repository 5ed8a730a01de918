//! coversheet CLI binary entry point
//!
//! This is a thin wrapper that installs logging and calls the library's
//! `run_cli()` function.

use anyhow::Result;
use coversheet_cli::{log_filter, run_cli};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    run_cli()
}
