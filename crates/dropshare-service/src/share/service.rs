//! Share service — bridges the HTTP layer to the share link manager.

use std::sync::Arc;

use dropshare_core::error::AppError;
use dropshare_core::result::AppResult;
use dropshare_core::traits::storage::FileStore;

use super::link::ShareLink;
use super::manager::ShareLinkManager;

/// Validates share requests against storage and delegates token handling
/// to the [`ShareLinkManager`].
#[derive(Clone)]
pub struct ShareService {
    /// Share link manager owning the token table.
    manager: Arc<ShareLinkManager>,
    /// File store, consulted to confirm a file exists before sharing it.
    store: Arc<dyn FileStore>,
}

impl std::fmt::Debug for ShareService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShareService").finish()
    }
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(manager: Arc<ShareLinkManager>, store: Arc<dyn FileStore>) -> Self {
        Self { manager, store }
    }

    /// Creates a share link for a stored file.
    ///
    /// Fails with `NotFound` if no file with that name exists in storage.
    pub async fn share(&self, file_name: &str) -> AppResult<ShareLink> {
        if !self.store.exists(file_name).await? {
            return Err(AppError::not_found(format!("File not found: {file_name}")));
        }
        self.manager.create_link(file_name).await
    }

    /// Resolves a share token back to the file name it grants access to.
    pub async fn resolve(&self, token: &str) -> AppResult<String> {
        self.manager.resolve(token).await
    }

    /// Revokes a share token. Revoking an absent token is a no-op.
    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        self.manager.revoke(token).await
    }
}
