//! Share link value object and token generation.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Number of random bytes backing a share token (256 bits of entropy).
const TOKEN_BYTES: usize = 32;

/// A time-limited share link granting public access to one stored file.
///
/// Fields never change after issuance. A link is valid if and only if the
/// current time is strictly before `expires_at`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareLink {
    /// The opaque token embedded in the public URL.
    pub token: String,
    /// Name of the shared file in the file store; not owned by the link.
    pub file_id: String,
    /// When the link was created.
    pub created_at: DateTime<Utc>,
    /// When the link stops being valid.
    pub expires_at: DateTime<Utc>,
}

impl ShareLink {
    /// Issue a new link for a file, valid for `ttl` from `now`.
    pub fn issue(file_id: impl Into<String>, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            token: generate_token(),
            file_id: file_id.into(),
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Whether the link is expired as of `now` (the boundary instant counts
    /// as expired).
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Generates a cryptographically secure random token for share links.
///
/// Tokens are the sole access-control mechanism for shared files, so they
/// must be unpredictable. The URL-safe base64 alphabet keeps them usable as
/// a path segment without escaping.
pub fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}
