//! Storage trait for the file store backing the application.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Metadata about a stored file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StoredObjectMeta {
    /// File name within the store.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Last modified timestamp.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Trait for the flat file store holding uploaded files.
///
/// The store addresses files by name only; names never contain path
/// separators. The [`FileStore`] trait is defined here in `dropshare-core`
/// and implemented in `dropshare-storage`.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Check whether a file exists under the given name.
    async fn exists(&self, name: &str) -> AppResult<bool>;

    /// Read a file into memory as a complete byte vector.
    async fn read_bytes(&self, name: &str) -> AppResult<Bytes>;

    /// Write bytes to a file under the given name.
    async fn write(&self, name: &str, data: Bytes) -> AppResult<()>;

    /// Delete the file stored under the given name.
    async fn delete(&self, name: &str) -> AppResult<()>;

    /// List all stored files.
    async fn list(&self) -> AppResult<Vec<StoredObjectMeta>>;

    /// Get metadata about a single stored file.
    async fn metadata(&self, name: &str) -> AppResult<StoredObjectMeta>;
}
