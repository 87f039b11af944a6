//! Share link manager — owns the token table and enforces expiry.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use dropshare_core::error::AppError;
use dropshare_core::result::AppResult;

use super::link::ShareLink;

/// Maps file names to time-limited public tokens and resolves tokens back,
/// enforcing expiry.
///
/// The token table lives in memory behind a single Tokio mutex, so every
/// operation is an atomic read-modify-write with respect to concurrent
/// requests. Suitable for single-node deployments only.
#[derive(Debug)]
pub struct ShareLinkManager {
    /// Token table, keyed by token.
    links: Mutex<HashMap<String, ShareLink>>,
    /// Validity window applied to every new link.
    ttl: Duration,
}

impl ShareLinkManager {
    /// Creates a new manager issuing links valid for `ttl_days`.
    pub fn new(ttl_days: i64) -> Self {
        Self {
            links: Mutex::new(HashMap::new()),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Issues a new link for a file.
    ///
    /// The caller is trusted to pass a file name that exists in storage;
    /// the manager never touches storage itself.
    pub async fn create_link(&self, file_id: &str) -> AppResult<ShareLink> {
        self.create_link_at(file_id, Utc::now()).await
    }

    /// Resolves a token back to its file name.
    ///
    /// Fails with `NotFound` for unknown or revoked tokens and with
    /// `Expired` once the validity window has elapsed. An expired entry is
    /// removed from the table as a side effect of the check.
    pub async fn resolve(&self, token: &str) -> AppResult<String> {
        self.resolve_at(token, Utc::now()).await
    }

    /// Removes a link if present. Revoking an absent token is a no-op.
    pub async fn revoke(&self, token: &str) -> AppResult<()> {
        let mut links = self.links.lock().await;
        if let Some(link) = links.remove(token) {
            info!(file = %link.file_id, "Share link revoked");
        }
        Ok(())
    }

    /// Removes every expired link and returns how many were removed.
    ///
    /// Resolution-time expiry is authoritative; this sweep only keeps the
    /// table from accumulating dead entries.
    pub async fn purge_expired(&self) -> usize {
        self.purge_expired_at(Utc::now()).await
    }

    /// Number of links currently tracked, expired or not.
    pub async fn tracked(&self) -> usize {
        self.links.lock().await.len()
    }

    async fn create_link_at(&self, file_id: &str, now: DateTime<Utc>) -> AppResult<ShareLink> {
        let link = ShareLink::issue(file_id, now, self.ttl);

        let mut links = self.links.lock().await;
        if links.contains_key(&link.token) {
            // 256-bit tokens colliding means the randomness source is broken.
            return Err(AppError::internal("Share token collision detected"));
        }
        links.insert(link.token.clone(), link.clone());
        drop(links);

        info!(
            file = %link.file_id,
            expires_at = %link.expires_at,
            "Share link created"
        );

        Ok(link)
    }

    async fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> AppResult<String> {
        let mut links = self.links.lock().await;

        let link = match links.get(token) {
            Some(link) => link.clone(),
            None => return Err(AppError::not_found("Unknown share link")),
        };

        if link.is_expired_at(now) {
            links.remove(token);
            debug!(file = %link.file_id, "Dropped expired share link on access");
            return Err(AppError::expired("Share link has expired"));
        }

        Ok(link.file_id)
    }

    async fn purge_expired_at(&self, now: DateTime<Utc>) -> usize {
        let mut links = self.links.lock().await;
        let before = links.len();
        links.retain(|_, link| !link.is_expired_at(now));
        let removed = before - links.len();
        drop(links);

        if removed > 0 {
            info!(removed, "Purged expired share links");
        }
        removed
    }
}
