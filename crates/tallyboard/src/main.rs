//! Tallyboard settings tool entry point.
//!
//! # What happens at startup
//!
//! 1. CLI arguments are parsed with `clap` into a [`Cli`] struct.
//! 2. `tracing_subscriber` is initialised.  The level comes from `RUST_LOG`
//!    when set, otherwise from `--log-level`.  Logs go to stderr so that
//!    `show` output on stdout stays machine-readable.
//! 3. The command runs against the settings store and any output is printed.

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tallyboard::cli::{execute, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    debug!(?cli, "arguments parsed");

    if let Some(output) = execute(cli)? {
        println!("{output}");
    }
    Ok(())
}
