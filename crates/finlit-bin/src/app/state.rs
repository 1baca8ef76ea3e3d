//! Shared application state.

use crate::notice::NoticeBoard;
use finlit_api::{ApiClient, ProfileDirectory};
use finlit_auth::{LifecycleManager, SessionStore, SupabaseAuth};
use finlit_core::{Config, Paths};
use std::sync::Arc;

/// Shared client state, constructed once in `main`.
#[derive(Clone)]
pub struct AppState {
    #[allow(dead_code)]
    pub config: Arc<Config>,
    /// Supabase auth client holding the current session.
    pub auth: Arc<SupabaseAuth>,
    /// Backend REST API client.
    pub api: Arc<ApiClient>,
    /// Session lifecycle manager (startup gate + refresh scheduler).
    pub lifecycle: Arc<LifecycleManager>,
    /// Banner state surfaced to the user.
    pub notices: NoticeBoard,
}

impl AppState {
    /// Wire up all clients from configuration. Any session persisted under
    /// `paths` from a previous invocation is restored.
    pub fn new(config: Config, paths: &Paths) -> Self {
        let auth = Arc::new(
            SupabaseAuth::new(
                config.supabase_url.clone(),
                config.supabase_anon_key.clone(),
            )
            .with_session_file(paths.session_file()),
        );
        let store: Arc<dyn SessionStore> = auth.clone();

        let profiles = Arc::new(ProfileDirectory::new(
            config.supabase_url.clone(),
            config.supabase_anon_key.clone(),
            store.clone(),
        ));

        let lifecycle = Arc::new(LifecycleManager::new(store, profiles));

        Self {
            api: Arc::new(ApiClient::new(config.api_url.clone())),
            config: Arc::new(config),
            auth,
            lifecycle,
            notices: NoticeBoard::new(),
        }
    }
}
