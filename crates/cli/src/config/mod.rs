//! Command line configuration

use clap::Args;

use crate::config::{logging::LoggingConfig, orders::OrdersConfig, storage::StorageConfig};

pub(crate) mod logging;
pub(crate) mod orders;
pub(crate) mod storage;

pub(crate) use logging::LogFormat;

/// Settings shared by every command.
#[derive(Debug, Args)]
pub(crate) struct Config {
    /// Cart storage settings.
    #[command(flatten)]
    pub storage: StorageConfig,

    /// Order store settings.
    #[command(flatten)]
    pub orders: OrdersConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,
}
