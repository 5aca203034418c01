//! Photo byte storage.
//!
//! - [`ImageStore`] -- the storage seam handlers talk to.
//! - [`local::LocalImageStore`] -- filesystem implementation rooted at `STORAGE_ROOT`.
//! - [`metadata::read_dimensions`] -- pixel size sniffing at upload time.

pub mod local;
pub mod metadata;

use async_trait::async_trait;

pub use local::LocalImageStore;

/// Errors raised by an [`ImageStore`].
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The key would escape the store root or is otherwise malformed.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    /// Nothing is stored under the key.
    #[error("No object stored at {0}")]
    NotFound(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Keyed blob storage for uploaded images.
///
/// Keys are relative, `/`-separated paths such as `photos/7/<uuid>.png`.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store `bytes` under `key`, replacing anything already there.
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Read the bytes stored under `key`.
    async fn get(&self, key: &str) -> Result<Vec<u8>, StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;
}

/// Best-effort removal of several keys, logging failures.
///
/// Used after database deletes have already committed, when the rows no
/// longer reference the files.
pub async fn delete_all(store: &dyn ImageStore, keys: &[String]) {
    for key in keys {
        if let Err(e) = store.delete(key).await {
            tracing::warn!(storage_key = %key, error = %e, "Failed to remove stored image");
        }
    }
}
