//! Startup gate: the once-per-process session check that decides the entry
//! point for an already signed-in user.

use crate::error::AuthResult;
use crate::scheduler::RefreshScheduler;
use crate::session::Identity;
use crate::store::SessionStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

/// An identity linked within this many seconds counts as a first-time
/// provider sign-in.
pub const FRESH_IDENTITY_WINDOW_SECS: i64 = 30;

/// Client route the onboarding hand-off points at.
pub const ONBOARDING_ROUTE: &str = "/profile-select";

/// Provider tag checked for first-time sign-in detection.
const GOOGLE_PROVIDER: &str = "google";

/// Whether `identity` was linked within the freshness window of `now`.
pub fn is_fresh_identity(identity: &Identity, now: DateTime<Utc>) -> bool {
    (now - identity.created_at).num_seconds() < FRESH_IDENTITY_WINDOW_SECS
}

/// Queries whether onboarding (financial-profile creation) is complete.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    async fn has_financial_profile(&self, user_id: &str) -> AuthResult<bool>;
}

/// Decision produced by the startup check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupOutcome {
    /// The check already ran in this process; nothing was done.
    AlreadyRan,
    /// No session (or the session read failed); downstream renders an
    /// unauthenticated view.
    Unauthenticated,
    /// First-time provider sign-in without a financial profile; the caller
    /// should route to `route`.
    OnboardingRequired { route: &'static str },
    /// First-time provider sign-in but onboarding was already completed.
    AlreadyOnboarded,
    /// Returning user; the refresh chain was armed.
    RefreshScheduled,
}

/// Owns the startup gate and the refresh scheduler.
///
/// Constructed once at application start; `check_on_startup` is called
/// explicitly from the entry point and guards itself against re-invocation.
pub struct LifecycleManager {
    store: Arc<dyn SessionStore>,
    profiles: Arc<dyn ProfileLookup>,
    scheduler: RefreshScheduler,
    started: AtomicBool,
}

impl LifecycleManager {
    pub fn new(store: Arc<dyn SessionStore>, profiles: Arc<dyn ProfileLookup>) -> Self {
        let scheduler = RefreshScheduler::new(store.clone());
        Self {
            store,
            profiles,
            scheduler,
            started: AtomicBool::new(false),
        }
    }

    /// The refresh scheduler owned by this manager.
    pub fn scheduler(&self) -> &RefreshScheduler {
        &self.scheduler
    }

    /// Run the startup session check.
    ///
    /// Exactly one invocation per process does anything; later calls return
    /// [`StartupOutcome::AlreadyRan`] without a second redirect or a second
    /// refresh chain.
    pub async fn check_on_startup(&self) -> AuthResult<StartupOutcome> {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("Startup check already ran");
            return Ok(StartupOutcome::AlreadyRan);
        }

        let session = match self.store.get_session().await {
            Ok(Some(session)) => session,
            Ok(None) => {
                info!("No active session");
                return Ok(StartupOutcome::Unauthenticated);
            }
            Err(err) => {
                error!(error = %err, "Failed to read session on startup");
                return Ok(StartupOutcome::Unauthenticated);
            }
        };

        debug!(user_id = %session.user.id, "User session found");

        let google_identity = session
            .user
            .identities
            .iter()
            .find(|identity| identity.provider == GOOGLE_PROVIDER);

        let first_sign_in = match google_identity {
            Some(identity) => is_fresh_identity(identity, Utc::now()),
            None => {
                debug!("No google identity linked to this user");
                false
            }
        };

        if first_sign_in {
            if self.has_financial_profile(&session.user.id).await {
                info!("User has already completed onboarding");
                return Ok(StartupOutcome::AlreadyOnboarded);
            }
            info!(route = ONBOARDING_ROUTE, "First provider sign-in; onboarding required");
            return Ok(StartupOutcome::OnboardingRequired {
                route: ONBOARDING_ROUTE,
            });
        }

        self.scheduler.schedule_refresh();
        Ok(StartupOutcome::RefreshScheduled)
    }

    /// Lookup failures are reported as "no profile", matching the upstream
    /// behavior of falling through to onboarding on a failed query.
    async fn has_financial_profile(&self, user_id: &str) -> bool {
        match self.profiles.has_financial_profile(user_id).await {
            Ok(exists) => exists,
            Err(err) => {
                error!(error = %err, "Failed to look up financial profile");
                false
            }
        }
    }

    /// Tear down the refresh chain (sign-out or process shutdown).
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }
}
