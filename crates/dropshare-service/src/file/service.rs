//! File service — upload, download, delete, and list stored files.

use std::sync::Arc;

use bytes::Bytes;
use rand::RngCore;
use tracing::info;

use dropshare_core::config::storage::StorageConfig;
use dropshare_core::error::AppError;
use dropshare_core::result::AppResult;
use dropshare_core::traits::storage::{FileStore, StoredObjectMeta};

/// Length of the random hex tag appended to uploaded file names.
const NAME_TAG_LEN: usize = 10;

/// Orchestrates the file store for upload, download, delete, and list.
#[derive(Clone)]
pub struct FileService {
    /// File store backend.
    store: Arc<dyn FileStore>,
    /// Storage configuration (size limits).
    config: StorageConfig,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish()
    }
}

/// Result of a completed upload.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadedFile {
    /// Name the file was stored under.
    pub name: String,
    /// Size in bytes.
    pub size_bytes: u64,
}

/// File content and headers for a download response.
#[derive(Debug)]
pub struct FileDownload {
    /// File content bytes.
    pub data: Bytes,
    /// MIME type for the Content-Type header.
    pub content_type: String,
    /// Name for the Content-Disposition header.
    pub file_name: String,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(store: Arc<dyn FileStore>, config: StorageConfig) -> Self {
        Self { store, config }
    }

    /// Stores an uploaded file under a uniquified name.
    ///
    /// The client-supplied name is sanitized and suffixed with a random tag
    /// so uploads never overwrite an existing file.
    pub async fn upload(&self, original_name: &str, data: Bytes) -> AppResult<UploadedFile> {
        if data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if data.len() as u64 > self.config.max_upload_size_bytes {
            return Err(AppError::validation(format!(
                "File too large. Max size is {} bytes",
                self.config.max_upload_size_bytes
            )));
        }

        let name = unique_file_name(original_name)?;
        let size_bytes = data.len() as u64;
        self.store.write(&name, data).await?;

        info!(name = %name, bytes = size_bytes, "File uploaded");

        Ok(UploadedFile { name, size_bytes })
    }

    /// Reads a stored file for download.
    pub async fn download(&self, name: &str) -> AppResult<FileDownload> {
        let data = self.store.read_bytes(name).await?;
        Ok(FileDownload {
            content_type: mime_for_name(name),
            file_name: name.to_string(),
            data,
        })
    }

    /// Deletes a stored file. Fails with `NotFound` if it does not exist.
    pub async fn delete(&self, name: &str) -> AppResult<()> {
        self.store.delete(name).await?;
        info!(name = %name, "File deleted");
        Ok(())
    }

    /// Lists all stored files with their sizes.
    pub async fn list(&self) -> AppResult<Vec<StoredObjectMeta>> {
        self.store.list().await
    }
}

/// Sanitizes a client-supplied file name down to a safe flat name.
///
/// Path separators and anything outside `[A-Za-z0-9._-]` become
/// underscores; leading dots are stripped so names cannot be hidden files
/// or parent references.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    cleaned.trim_start_matches('.').to_string()
}

/// Builds a unique storage name from a client-supplied one:
/// `stem_<hex tag>.ext`.
fn unique_file_name(original: &str) -> AppResult<String> {
    let clean = sanitize_file_name(original);
    if clean.trim_matches(|c| c == '.' || c == '_').is_empty() {
        return Err(AppError::validation(format!(
            "Invalid file name: {original}"
        )));
    }

    let (stem, ext) = match clean.rfind('.') {
        Some(idx) if idx > 0 => clean.split_at(idx),
        _ => (clean.as_str(), ""),
    };

    let mut buf = [0u8; NAME_TAG_LEN / 2];
    rand::rng().fill_bytes(&mut buf);
    let tag: String = buf.iter().map(|b| format!("{b:02x}")).collect();

    Ok(format!("{stem}_{tag}{ext}"))
}

/// Guess a MIME type from a file name extension.
fn mime_for_name(name: &str) -> String {
    let ext = name.rsplit('.').next().unwrap_or("").to_lowercase();
    let mime = match ext.as_str() {
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "js" => "application/javascript",
        "json" => "application/json",
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "mp4" => "video/mp4",
        "mp3" => "audio/mpeg",
        "csv" => "text/csv",
        _ => "application/octet-stream",
    };
    mime.to_string()
}
