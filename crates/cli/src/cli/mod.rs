use clap::{Parser, Subcommand};
use kledje::{session::CartSession, storage::FileStorage};

use crate::config::Config;

mod cart;
mod checkout;
mod cities;
mod console;

use console::ConsoleObserver;

#[derive(Debug, Parser)]
#[command(name = "kledje", about = "Kledje storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Inspect or change the cart
    Cart(cart::CartCommand),
    /// Place a cash-on-delivery order for the cart
    Checkout(checkout::CheckoutArgs),
    /// List the cities orders are delivered to
    Cities,
}

impl Cli {
    /// Parse arguments, falling back to the environment and `.env`.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Cart(command) => cart::run(command, &self.config),
            Commands::Checkout(args) => checkout::run(args, &self.config).await,
            Commands::Cities => {
                cities::run();

                Ok(())
            }
        }
    }
}

fn open_session(config: &Config) -> CartSession<FileStorage, ConsoleObserver> {
    CartSession::with_observer(config.storage.cart_store(), ConsoleObserver)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_negative_quantity() -> TestResult {
        let cli = Cli::try_parse_from([
            "kledje",
            "--data-dir",
            "/tmp/kledje-test",
            "cart",
            "set",
            "--id",
            "lip-01",
            "--quantity",
            "-1",
        ])?;

        assert_eq!(cli.config.storage.data_dir, Path::new("/tmp/kledje-test"));
        assert!(
            matches!(cli.command, Commands::Cart(_)),
            "expected cart command"
        );

        Ok(())
    }

    #[test]
    fn price_must_be_a_decimal() {
        let result = Cli::try_parse_from([
            "kledje", "cart", "add", "--id", "1", "--name", "كريم", "--price", "abc",
        ]);

        assert!(result.is_err(), "non-numeric price should be rejected");
    }
}
