//! Session and identity records consumed from the auth provider.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current epoch time in whole seconds.
pub fn epoch_now() -> i64 {
    Utc::now().timestamp()
}

/// A server-issued auth session.
///
/// `expires_at` is epoch seconds and is monotonically non-decreasing across
/// successful refreshes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token for API calls.
    pub access_token: String,
    /// Token used to extend the session.
    pub refresh_token: String,
    /// Expiry timestamp in epoch seconds.
    pub expires_at: i64,
    /// The authenticated user.
    pub user: AuthUser,
}

impl Session {
    /// Whether the session expires within `buffer` seconds of `now`.
    pub fn expires_within(&self, now: i64, buffer: i64) -> bool {
        self.expires_at <= now + buffer
    }

    /// Remaining lifetime in seconds relative to `now` (may be negative).
    pub fn remaining_secs(&self, now: i64) -> i64 {
        self.expires_at - now
    }
}

/// The user record attached to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    /// User UUID.
    pub id: String,
    /// Email address, if known.
    pub email: Option<String>,
    /// Linked authentication methods.
    #[serde(default)]
    pub identities: Vec<Identity>,
}

/// A linked authentication method (e.g. a specific OAuth provider).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Identity {
    /// Provider tag, e.g. "google" or "email".
    pub provider: String,
    /// When this identity was linked to the user.
    pub created_at: DateTime<Utc>,
}
