//! Session lifecycle management for the finlit client.
//!
//! This crate keeps a Supabase auth session valid without user intervention:
//!
//! - [`SupabaseAuth`]: GoTrue REST client holding the current session.
//! - [`RefreshScheduler`]: single-task driver that refreshes the access token
//!   shortly before expiry and signs out when a refresh is rejected.
//! - [`LifecycleManager`]: runs the one-time startup check that routes a
//!   first-time provider sign-in to onboarding, or hands off to the scheduler.

mod error;
mod scheduler;
mod session;
mod startup;
mod store;
mod supabase;

pub use error::{AuthError, AuthResult};
pub use scheduler::{refresh_delay, RefreshScheduler, REFRESH_BUFFER_SECS};
pub use session::{epoch_now, AuthUser, Identity, Session};
pub use startup::{
    is_fresh_identity, LifecycleManager, ProfileLookup, StartupOutcome,
    FRESH_IDENTITY_WINDOW_SECS, ONBOARDING_ROUTE,
};
pub use store::SessionStore;
pub use supabase::SupabaseAuth;
