//! Token refresh scheduler.
//!
//! A single spawned driver task keeps the session fresh: each cycle it reads
//! the current session, refreshes it when it is within the buffer window of
//! expiry, then sleeps until the next buffer boundary. A rejected refresh
//! signs the user out and ends the chain. Arming the scheduler while a driver
//! is pending aborts the old driver first, so at most one refresh task exists
//! at any instant.

use crate::session::epoch_now;
use crate::store::SessionStore;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Safety margin before expiry within which a refresh is considered urgent,
/// in seconds.
pub const REFRESH_BUFFER_SECS: i64 = 300;

/// Floor applied when the computed delay is zero, so a session that is still
/// inside the buffer after a refresh cannot drive a hot loop.
const MIN_REFRESH_DELAY: Duration = Duration::from_secs(1);

/// Delay until the next refresh cycle: `buffer` seconds before `expires_at`,
/// never negative.
pub fn refresh_delay(expires_at: i64, now: i64) -> Duration {
    let secs = (expires_at - now - REFRESH_BUFFER_SECS).max(0) as u64;
    let delay = Duration::from_secs(secs);
    if delay.is_zero() {
        MIN_REFRESH_DELAY
    } else {
        delay
    }
}

/// Owns the single pending refresh task for the process.
pub struct RefreshScheduler {
    store: Arc<dyn SessionStore>,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshScheduler {
    /// Create a scheduler over the given session store. Nothing is armed
    /// until [`RefreshScheduler::schedule_refresh`] is called.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            driver: Mutex::new(None),
        }
    }

    /// Arm the refresh chain, canceling any outstanding driver first.
    ///
    /// The driver evaluates the session immediately, so a session already
    /// inside the buffer window is refreshed right away rather than at some
    /// future tick.
    pub fn schedule_refresh(&self) {
        let mut guard = self.driver.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = guard.take() {
            debug!("Replacing pending refresh task");
            handle.abort();
        }
        let store = self.store.clone();
        *guard = Some(tokio::spawn(run_refresh_chain(store)));
    }

    /// Whether a refresh driver is currently pending.
    pub fn is_armed(&self) -> bool {
        let guard = self.driver.lock().unwrap_or_else(|e| e.into_inner());
        guard.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Cancel the pending refresh task, if any.
    pub fn shutdown(&self) {
        let mut guard = self.driver.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = guard.take() {
            handle.abort();
        }
    }
}

impl Drop for RefreshScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Drive refresh cycles until the chain terminates.
///
/// Terminal conditions: no session, a session read failure, a rejected
/// refresh (after signing out), or a non-positive post-refresh lifetime.
async fn run_refresh_chain(store: Arc<dyn SessionStore>) {
    loop {
        let session = match store.get_session().await {
            Ok(Some(session)) => session,
            Ok(None) => {
                debug!("No active session; refresh chain idle");
                return;
            }
            Err(err) => {
                error!(error = %err, "Failed to read session; aborting refresh chain");
                return;
            }
        };

        let now = epoch_now();
        let mut expires_at = session.expires_at;

        if session.expires_within(now, REFRESH_BUFFER_SECS) {
            warn!(expires_at, "Session expiring soon; refreshing");
            match store.refresh_session().await {
                Ok(Some(renewed)) => {
                    info!(expires_at = renewed.expires_at, "Session refreshed");
                    expires_at = renewed.expires_at;
                }
                Ok(None) => {
                    error!("Refresh returned no session; signing out");
                    sign_out_after_failed_refresh(&store).await;
                    return;
                }
                Err(err) => {
                    error!(error = %err, "Refresh failed; signing out");
                    sign_out_after_failed_refresh(&store).await;
                    return;
                }
            }
        }

        let now = epoch_now();
        if expires_at - now <= 0 {
            // Upstream behavior: halt the chain without signing out. Arguably
            // this should force a sign-out like the rejected-refresh path.
            error!(
                expires_at,
                "Session expiry is in the past after refresh; halting refresh chain"
            );
            return;
        }

        let delay = refresh_delay(expires_at, now);
        debug!(delay_secs = delay.as_secs(), "Scheduling next token refresh");
        tokio::time::sleep(delay).await;
    }
}

async fn sign_out_after_failed_refresh(store: &Arc<dyn SessionStore>) {
    if let Err(err) = store.sign_out().await {
        error!(error = %err, "Sign-out after failed refresh also failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AuthError, AuthResult};
    use crate::session::{AuthUser, Session};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn session(expires_at: i64) -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at,
            user: AuthUser {
                id: "user-1".to_string(),
                email: None,
                identities: vec![],
            },
        }
    }

    /// Scripted store: each `get_session` / `refresh_session` call pops the
    /// next step; call counts are observable.
    struct ScriptedStore {
        sessions: Mutex<Vec<AuthResult<Option<Session>>>>,
        refreshes: Mutex<Vec<AuthResult<Option<Session>>>>,
        refresh_calls: AtomicUsize,
        sign_outs: AtomicUsize,
    }

    impl ScriptedStore {
        fn new(
            sessions: Vec<AuthResult<Option<Session>>>,
            refreshes: Vec<AuthResult<Option<Session>>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                sessions: Mutex::new(sessions),
                refreshes: Mutex::new(refreshes),
                refresh_calls: AtomicUsize::new(0),
                sign_outs: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SessionStore for ScriptedStore {
        async fn get_session(&self) -> AuthResult<Option<Session>> {
            let mut guard = self.sessions.lock().unwrap();
            if guard.is_empty() {
                Ok(None)
            } else {
                guard.remove(0)
            }
        }

        async fn refresh_session(&self) -> AuthResult<Option<Session>> {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            let mut guard = self.refreshes.lock().unwrap();
            if guard.is_empty() {
                Ok(None)
            } else {
                guard.remove(0)
            }
        }

        async fn sign_out(&self) -> AuthResult<()> {
            self.sign_outs.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Store whose `get_session` never resolves; tracks how many drivers are
    /// currently parked inside it.
    struct BlockingStore {
        active: AtomicUsize,
    }

    struct ActiveGuard<'a>(&'a AtomicUsize);

    impl Drop for ActiveGuard<'_> {
        fn drop(&mut self) {
            self.0.fetch_sub(1, Ordering::SeqCst);
        }
    }

    #[async_trait]
    impl SessionStore for BlockingStore {
        async fn get_session(&self) -> AuthResult<Option<Session>> {
            self.active.fetch_add(1, Ordering::SeqCst);
            let _guard = ActiveGuard(&self.active);
            std::future::pending().await
        }

        async fn refresh_session(&self) -> AuthResult<Option<Session>> {
            Ok(None)
        }

        async fn sign_out(&self) -> AuthResult<()> {
            Ok(())
        }
    }

    fn api_error() -> AuthError {
        AuthError::Api {
            status: reqwest::StatusCode::UNAUTHORIZED,
            summary: "len=0,digest=0000000000000000".to_string(),
        }
    }

    // ------------------------------------------------------------------
    // Pure delay computation
    // ------------------------------------------------------------------

    #[test]
    fn delay_is_buffer_before_expiry() {
        let now = 1_000_000;
        let delay = refresh_delay(now + 1_000, now);
        assert_eq!(delay, Duration::from_millis(700_000));
    }

    #[test]
    fn delay_never_negative() {
        let now = 1_000_000;
        // Still inside the buffer: clamped to the floor, not negative.
        let delay = refresh_delay(now + 100, now);
        assert_eq!(delay, MIN_REFRESH_DELAY);
    }

    #[test]
    fn delay_for_expired_session_is_floored() {
        let now = 1_000_000;
        let delay = refresh_delay(now - 50, now);
        assert_eq!(delay, MIN_REFRESH_DELAY);
    }

    #[test]
    fn delay_at_buffer_boundary_is_floored() {
        let now = 1_000_000;
        let delay = refresh_delay(now + REFRESH_BUFFER_SECS, now);
        assert_eq!(delay, MIN_REFRESH_DELAY);
    }

    // ------------------------------------------------------------------
    // Driver behavior
    // ------------------------------------------------------------------

    #[tokio::test]
    async fn session_inside_buffer_is_refreshed_immediately() {
        let now = epoch_now();
        let store = ScriptedStore::new(
            vec![Ok(Some(session(now + 100)))],
            vec![Err(api_error())],
        );

        run_refresh_chain(store.clone()).await;

        assert_eq!(store.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refresh_failure_signs_out_once_and_halts() {
        let now = epoch_now();
        let store = ScriptedStore::new(
            vec![Ok(Some(session(now + 100)))],
            vec![Err(api_error())],
        );

        run_refresh_chain(store.clone()).await;

        assert_eq!(store.sign_outs.load(Ordering::SeqCst), 1);
        // Chain ended; no second session read or refresh happened.
        assert_eq!(store.refresh_calls.load(Ordering::SeqCst), 1);
        assert!(store.sessions.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn refresh_returning_no_session_signs_out_once_and_halts() {
        let now = epoch_now();
        let store = ScriptedStore::new(vec![Ok(Some(session(now + 100)))], vec![Ok(None)]);

        run_refresh_chain(store.clone()).await;

        assert_eq!(store.sign_outs.load(Ordering::SeqCst), 1);
        assert_eq!(store.refresh_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn no_session_ends_chain_without_refresh_or_sign_out() {
        let store = ScriptedStore::new(vec![Ok(None)], vec![]);

        run_refresh_chain(store.clone()).await;

        assert_eq!(store.refresh_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.sign_outs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn session_read_error_ends_chain_silently() {
        let store = ScriptedStore::new(vec![Err(api_error())], vec![]);

        run_refresh_chain(store.clone()).await;

        assert_eq!(store.refresh_calls.load(Ordering::SeqCst), 0);
        assert_eq!(store.sign_outs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn stale_post_refresh_expiry_halts_without_sign_out() {
        let now = epoch_now();
        // Refresh "succeeds" but hands back an expiry in the past.
        let store = ScriptedStore::new(
            vec![Ok(Some(session(now + 100)))],
            vec![Ok(Some(session(now - 10)))],
        );

        run_refresh_chain(store.clone()).await;

        assert_eq!(store.refresh_calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.sign_outs.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn in_buffer_refresh_result_waits_before_next_cycle() {
        let now = epoch_now();
        // The refreshed session is still inside the buffer window, so the
        // driver must park on the floored delay instead of looping in the
        // same tick, then find no session and stop.
        let store = ScriptedStore::new(
            vec![Ok(Some(session(now + 100))), Ok(None)],
            vec![Ok(Some(session(now + 200)))],
        );

        let started = tokio::time::Instant::now();
        run_refresh_chain(store.clone()).await;

        assert_eq!(store.refresh_calls.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() >= MIN_REFRESH_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn healthy_session_sleeps_until_buffer_boundary() {
        let now = epoch_now();
        let store = ScriptedStore::new(
            vec![Ok(Some(session(now + 1_000))), Ok(None)],
            vec![],
        );

        let started = tokio::time::Instant::now();
        run_refresh_chain(store.clone()).await;

        // No refresh yet; the driver slept until the buffer boundary before
        // re-reading. A wall-clock second may tick between the two epoch
        // reads, so allow a little slack below the nominal 700s.
        assert_eq!(store.refresh_calls.load(Ordering::SeqCst), 0);
        assert!(started.elapsed() >= Duration::from_secs(695));
    }

    // ------------------------------------------------------------------
    // Single-timer invariant
    // ------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn rearming_aborts_previous_driver() {
        let store = Arc::new(BlockingStore {
            active: AtomicUsize::new(0),
        });
        let scheduler = RefreshScheduler::new(store.clone());

        scheduler.schedule_refresh();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(store.active.load(Ordering::SeqCst), 1);

        scheduler.schedule_refresh();
        tokio::time::sleep(Duration::from_millis(10)).await;

        // The first driver was aborted before the second was armed.
        assert_eq!(store.active.load(Ordering::SeqCst), 1);
        assert!(scheduler.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_pending_driver() {
        let store = Arc::new(BlockingStore {
            active: AtomicUsize::new(0),
        });
        let scheduler = RefreshScheduler::new(store.clone());

        scheduler.schedule_refresh();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(scheduler.is_armed());

        scheduler.shutdown();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!scheduler.is_armed());
        assert_eq!(store.active.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn scheduler_idle_until_armed() {
        let store = ScriptedStore::new(vec![], vec![]);
        let scheduler = RefreshScheduler::new(store);
        assert!(!scheduler.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn finished_chain_reports_disarmed() {
        let store = ScriptedStore::new(vec![Ok(None)], vec![]);
        let scheduler = RefreshScheduler::new(store);

        scheduler.schedule_refresh();
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(!scheduler.is_armed());
    }
}
