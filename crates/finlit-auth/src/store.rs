//! The session store seam between the lifecycle manager and the auth provider.

use crate::{AuthResult, Session};
use async_trait::async_trait;

/// Read, refresh, and sign-out operations on the externally owned session.
///
/// The production implementation is [`crate::SupabaseAuth`]; tests substitute
/// scripted stores. The store is the only shared mutable resource the
/// scheduler touches, and it is responsible for its own internal consistency.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Fetch the current session state. No side effect.
    async fn get_session(&self) -> AuthResult<Option<Session>>;

    /// Attempt to extend the session. Mutates the stored session on success.
    /// `Ok(None)` means the provider returned no session (treated as a
    /// rejected refresh by the scheduler).
    async fn refresh_session(&self) -> AuthResult<Option<Session>>;

    /// Invalidate the session.
    async fn sign_out(&self) -> AuthResult<()>;
}
