//! Local filesystem file store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use dropshare_core::error::{AppError, ErrorKind};
use dropshare_core::result::AppResult;
use dropshare_core::traits::storage::{FileStore, StoredObjectMeta};

/// Local filesystem file store.
///
/// Files live flat under a single root directory; names never contain
/// path separators.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    /// Root directory for all stored files.
    root: PathBuf,
}

impl LocalFileStore {
    /// Create a new local file store rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create upload root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a file name to a path within the root.
    ///
    /// Names containing path separators or parent references are rejected
    /// so a crafted name can never escape the upload root.
    fn resolve(&self, name: &str) -> AppResult<PathBuf> {
        if name.is_empty() {
            return Err(AppError::validation("File name must not be empty"));
        }
        if name == "." || name == ".." || name.contains('/') || name.contains('\\') {
            return Err(AppError::validation(format!("Invalid file name: {name}")));
        }
        Ok(self.root.join(name))
    }

    async fn meta_for(&self, name: &str, path: &Path) -> AppResult<StoredObjectMeta> {
        let meta = fs::metadata(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {name}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to get metadata: {name}"),
                    e,
                )
            }
        })?;

        if !meta.is_file() {
            return Err(AppError::not_found(format!("File not found: {name}")));
        }

        let last_modified = meta
            .modified()
            .ok()
            .map(chrono::DateTime::<chrono::Utc>::from);

        Ok(StoredObjectMeta {
            name: name.to_string(),
            size_bytes: meta.len(),
            last_modified,
        })
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn exists(&self, name: &str) -> AppResult<bool> {
        let path = self.resolve(name)?;
        Ok(path.is_file())
    }

    async fn read_bytes(&self, name: &str) -> AppResult<Bytes> {
        let path = self.resolve(name)?;
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("File not found: {name}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read file: {name}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, name: &str, data: Bytes) -> AppResult<()> {
        let path = self.resolve(name)?;

        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {name}"),
                e,
            )
        })?;

        debug!(name, bytes = data.len(), "Wrote file");
        Ok(())
    }

    async fn delete(&self, name: &str) -> AppResult<()> {
        let path = self.resolve(name)?;
        if !path.is_file() {
            return Err(AppError::not_found(format!("File not found: {name}")));
        }

        fs::remove_file(&path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete file: {name}"),
                e,
            )
        })?;

        debug!(name, "Deleted file");
        Ok(())
    }

    async fn list(&self) -> AppResult<Vec<StoredObjectMeta>> {
        let mut entries = Vec::new();
        let mut dir = fs::read_dir(&self.root).await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to list upload root", e)
        })?;

        while let Some(entry) = dir.next_entry().await.map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Failed to read directory entry", e)
        })? {
            let entry_meta = entry.metadata().await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to get entry metadata", e)
            })?;

            if !entry_meta.is_file() {
                continue;
            }

            let last_modified = entry_meta
                .modified()
                .ok()
                .map(chrono::DateTime::<chrono::Utc>::from);

            entries.push(StoredObjectMeta {
                name: entry.file_name().to_string_lossy().to_string(),
                size_bytes: entry_meta.len(),
                last_modified,
            });
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries)
    }

    async fn metadata(&self, name: &str) -> AppResult<StoredObjectMeta> {
        let path = self.resolve(name)?;
        self.meta_for(name, &path).await
    }
}
