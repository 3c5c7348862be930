//! Durable cart storage

use std::{
    collections::HashMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, warn};

use crate::cart::Cart;

/// Storage key the cart is kept under by default.
pub const DEFAULT_CART_KEY: &str = "kledje-cart";

/// Errors raised by durable storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failure.
    #[error("storage i/o error")]
    Io(#[from] std::io::Error),

    /// Value could not be encoded.
    #[error("failed to encode value")]
    Serialize(#[from] serde_json::Error),

    /// Key cannot be used with this storage.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// String key-value storage that survives reloads.
pub trait KeyValueStorage {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the value cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`; deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the value cannot be removed.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-process storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);

        Ok(())
    }
}

/// Storage keeping one `<key>.json` file per key in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create storage rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the stored files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;

        Ok(self.dir.join(format!("{key}.json")))
    }
}

/// Keys become file names, so separators, `..` and control characters are refused.
fn validate_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty()
        || key.contains(['/', '\\'])
        || key.contains("..")
        || key.chars().any(char::is_control)
    {
        return Err(StorageError::InvalidKey(key.to_string()));
    }

    Ok(())
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path(key)?;
        let tmp = path.with_extension("json.tmp");

        fs::create_dir_all(&self.dir)?;

        if let Err(error) = fs::write(&tmp, value).and_then(|()| fs::rename(&tmp, &path)) {
            match fs::remove_file(&tmp) {
                Ok(()) => {}
                Err(cleanup) if cleanup.kind() == ErrorKind::NotFound => {}
                Err(cleanup) => {
                    debug!(path = %tmp.display(), error = %cleanup, "temp file left behind");
                }
            }

            return Err(error.into());
        }

        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

/// Persists the cart as a JSON array under a single storage key.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Create a store using [`DEFAULT_CART_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_CART_KEY)
    }

    /// Create a store using a custom key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key in use.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored cart.
    ///
    /// A missing, unreadable or malformed value yields an empty cart.
    pub fn load(&self) -> Cart {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(error) => {
                warn!(key = %self.key, %error, "failed to read stored cart, starting empty");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => {
                debug!(key = %self.key, lines = cart.len(), "loaded cart");
                cart
            }
            Err(error) => {
                warn!(key = %self.key, %error, "discarding malformed stored cart");
                Cart::new()
            }
        }
    }

    /// Overwrite the stored cart.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the cart cannot be encoded or written.
    pub fn save(&mut self, cart: &Cart) -> Result<(), StorageError> {
        let value = serde_json::to_string(cart)?;

        self.storage.set(&self.key, &value)
    }
}
