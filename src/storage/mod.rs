//! Durable client-side storage for the serialized cart.
//!
//! The cart treats storage as a flat key-value surface holding text.
//! Schema versioning of the stored text is not handled here.

mod file;
mod memory;

use std::path::PathBuf;

use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors that can occur when reading or writing storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage I/O failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid storage key '{key}': use ASCII letters, digits, '-' or '_'")]
    InvalidKey { key: String },
}

/// Key-value persistence surface.
pub trait CartStorage: Send + Sync {
    /// Read the text stored under `key`, `None` when nothing was written yet.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the text stored under `key`.
    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: CartStorage + ?Sized> CartStorage for std::sync::Arc<T> {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).write(key, value)
    }
}

/// Keys double as file names, so keep them boring.
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey {
            key: key.to_string(),
        })
    }
}
