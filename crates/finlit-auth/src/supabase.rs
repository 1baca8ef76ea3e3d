//! Supabase GoTrue REST client.
//!
//! Implements [`SessionStore`] over the hosted auth API: password sign-in,
//! sign-up, token refresh, and sign-out. The current session is held in
//! memory behind an `RwLock`; when a session file is configured the session
//! is mirrored to disk on every change so it survives process restarts.

use crate::error::{AuthError, AuthResult};
use crate::session::{epoch_now, AuthUser, Session};
use crate::store::SessionStore;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

/// Supabase auth client holding the current session.
pub struct SupabaseAuth {
    http_client: reqwest::Client,
    api_url: String,
    anon_key: String,
    session: RwLock<Option<Session>>,
    session_file: Option<PathBuf>,
}

fn read_session_file(path: &Path) -> AuthResult<Option<Session>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

fn write_session_file(path: &Path, session: &Session) -> AuthResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = serde_json::to_string_pretty(session)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn remove_session_file(path: &Path) -> AuthResult<()> {
    if path.exists() {
        std::fs::remove_file(path)?;
    }
    Ok(())
}

/// Credentials for password-based sign-in and sign-up.
#[derive(Debug, Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Request body for a refresh-token grant.
#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Token response from the GoTrue token and signup endpoints.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    expires_in: i64,
    /// GoTrue includes this on newer versions; derived from `expires_in`
    /// when absent.
    expires_at: Option<i64>,
    user: AuthUser,
}

impl TokenResponse {
    fn into_session(self) -> Session {
        let expires_at = self
            .expires_at
            .unwrap_or_else(|| epoch_now() + self.expires_in);
        Session {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at,
            user: self.user,
        }
    }
}

impl SupabaseAuth {
    /// Create a new auth client.
    ///
    /// # Arguments
    /// * `api_url` - The Supabase project API URL (e.g., `https://xyz.supabase.co`)
    /// * `anon_key` - The Supabase anonymous API key
    pub fn new(api_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.into(),
            anon_key: anon_key.into(),
            session: RwLock::new(None),
            session_file: None,
        }
    }

    /// Mirror the session to `path`, restoring any session already stored
    /// there. An unreadable or corrupt file is logged and treated as
    /// signed out.
    pub fn with_session_file(mut self, path: PathBuf) -> Self {
        match read_session_file(&path) {
            Ok(Some(session)) => {
                tracing::debug!(user_id = %session.user.id, "Restored session from disk");
                self.session = RwLock::new(Some(session));
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "Failed to read session file");
            }
        }
        self.session_file = Some(path);
        self
    }

    /// Write the current session state to the session file, if one is
    /// configured. Persistence failures are logged, never propagated.
    fn persist(&self, session: Option<&Session>) {
        let Some(path) = self.session_file.as_deref() else {
            return;
        };
        let result = match session {
            Some(session) => write_session_file(path, session),
            None => remove_session_file(path),
        };
        if let Err(err) = result {
            tracing::warn!(error = %err, path = %path.display(), "Failed to update session file");
        }
    }

    /// Build the auth API URL for an endpoint.
    fn auth_url(&self, endpoint: &str) -> String {
        format!("{}/auth/v1/{}", self.api_url, endpoint)
    }

    async fn error_from_response(context: &str, response: reqwest::Response) -> AuthError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let summary = summarize_response_body(&body);
        tracing::error!(status = %status, body_summary = %summary, "{}", context);
        AuthError::Api { status, summary }
    }

    /// Sign in with email and password, storing the resulting session.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> AuthResult<Session> {
        let url = self.auth_url("token?grant_type=password");

        tracing::debug!(email, "Signing in with password");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Content-Type", "application/json")
            .json(&PasswordCredentials { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("Password sign-in failed", response).await);
        }

        let session = response.json::<TokenResponse>().await?.into_session();
        tracing::info!(user_id = %session.user.id, "Signed in");
        *self.session.write().await = Some(session.clone());
        self.persist(Some(&session));
        Ok(session)
    }

    /// Sign up a new user with email and password.
    ///
    /// Depending on project settings the response may already carry a
    /// session; when it does, it is stored.
    pub async fn sign_up(&self, email: &str, password: &str) -> AuthResult<Session> {
        let url = self.auth_url("signup");

        tracing::debug!(email, "Signing up");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Content-Type", "application/json")
            .json(&PasswordCredentials { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("Sign-up failed", response).await);
        }

        let session = response.json::<TokenResponse>().await?.into_session();
        tracing::info!(user_id = %session.user.id, "Signed up");
        *self.session.write().await = Some(session.clone());
        self.persist(Some(&session));
        Ok(session)
    }

    /// Adopt a session obtained out of band.
    pub async fn set_session(&self, session: Session) {
        self.persist(Some(&session));
        *self.session.write().await = Some(session);
    }
}

#[async_trait]
impl SessionStore for SupabaseAuth {
    async fn get_session(&self) -> AuthResult<Option<Session>> {
        Ok(self.session.read().await.clone())
    }

    async fn refresh_session(&self) -> AuthResult<Option<Session>> {
        let refresh_token = {
            let guard = self.session.read().await;
            match guard.as_ref() {
                Some(session) => session.refresh_token.clone(),
                None => return Ok(None),
            }
        };

        let url = self.auth_url("token?grant_type=refresh_token");

        tracing::debug!("Refreshing session");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Content-Type", "application/json")
            .json(&RefreshRequest {
                refresh_token: &refresh_token,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::error_from_response("Token refresh failed", response).await);
        }

        let session = response.json::<TokenResponse>().await?.into_session();
        tracing::debug!(expires_at = session.expires_at, "Session refreshed");
        *self.session.write().await = Some(session.clone());
        self.persist(Some(&session));
        Ok(Some(session))
    }

    async fn sign_out(&self) -> AuthResult<()> {
        let access_token = self.session.write().await.take().map(|s| s.access_token);
        self.persist(None);

        let Some(access_token) = access_token else {
            return Ok(());
        };

        let url = self.auth_url("logout");

        let send_result = self
            .http_client
            .post(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", access_token))
            .send()
            .await;

        // Local session is already cleared; don't fail on logout errors
        match send_result {
            Ok(response) if !response.status().is_success() => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                let summary = summarize_response_body(&body);
                tracing::warn!(status = %status, body_summary = %summary, "Logout request failed");
            }
            Ok(_) => {}
            Err(err) => {
                tracing::warn!(error = %err, "Logout request failed");
            }
        }

        tracing::info!("Signed out");
        Ok(())
    }
}
