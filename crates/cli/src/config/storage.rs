//! Storage Config

use std::path::PathBuf;

use clap::Args;
use kledje::storage::{CartStore, DEFAULT_CART_KEY, FileStorage};

/// Cart storage settings.
#[derive(Debug, Args)]
pub(crate) struct StorageConfig {
    /// Directory the cart is kept in
    #[arg(long, env = "KLEDJE_DATA_DIR", default_value = ".kledje")]
    pub data_dir: PathBuf,

    /// Storage key of the cart
    #[arg(long, env = "KLEDJE_CART_KEY", default_value = DEFAULT_CART_KEY)]
    pub cart_key: String,
}

impl StorageConfig {
    /// Cart store backed by files under the data directory.
    pub(crate) fn cart_store(&self) -> CartStore<FileStorage> {
        CartStore::with_key(FileStorage::new(&self.data_dir), &self.cart_key)
    }
}
