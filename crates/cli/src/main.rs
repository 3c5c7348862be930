//! Kledje storefront CLI

use std::process;

use crate::cli::Cli;

mod cli;
mod config;
mod observability;

/// Kledje CLI entry point
#[tokio::main]
pub async fn main() {
    let cli = Cli::load().unwrap_or_else(|error| error.exit());

    if let Err(error) = observability::init(&cli.config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }

    if let Err(error) = cli.run().await {
        #[expect(clippy::print_stderr, reason = "command errors are reported on stderr")]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
