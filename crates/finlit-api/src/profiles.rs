//! Financial-profile lookup against the Supabase PostgREST API.
//!
//! Answers the startup gate's onboarding question by checking whether a
//! `user_financial_profiles` row exists for the user.

use async_trait::async_trait;
use finlit_auth::{AuthError, AuthResult, ProfileLookup, SessionStore};
use serde::Deserialize;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

fn summarize_response_body(body: &str) -> String {
    let mut hasher = DefaultHasher::new();
    body.hash(&mut hasher);
    format!("len={},digest={:016x}", body.len(), hasher.finish())
}

/// Row shape of the financial-profile existence query.
#[derive(Debug, Deserialize)]
struct ProfileRow {
    #[allow(dead_code)]
    user_id: String,
}

/// Supabase PostgREST client for the `user_financial_profiles` table.
pub struct ProfileDirectory {
    http_client: reqwest::Client,
    api_url: String,
    anon_key: String,
    store: Arc<dyn SessionStore>,
}

impl ProfileDirectory {
    /// Create a new profile directory.
    ///
    /// The session store supplies the bearer token; the caller only invokes
    /// the lookup while a session exists.
    pub fn new(
        api_url: impl Into<String>,
        anon_key: impl Into<String>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.into(),
            anon_key: anon_key.into(),
            store,
        }
    }

    /// Build the REST API URL for a table.
    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.api_url, table)
    }
}

#[async_trait]
impl ProfileLookup for ProfileDirectory {
    async fn has_financial_profile(&self, user_id: &str) -> AuthResult<bool> {
        let access_token = self
            .store
            .get_session()
            .await?
            .map(|session| session.access_token)
            .ok_or(AuthError::SessionMissing)?;

        let url = format!(
            "{}?user_id=eq.{}&select=user_id&limit=1",
            self.rest_url("user_financial_profiles"),
            user_id
        );

        tracing::debug!(%url, "Checking for financial profile");

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", access_token))
            .header("Accept", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let summary = summarize_response_body(&body);
            tracing::error!(status = %status, body_summary = %summary, "Failed to fetch financial profile");
            return Err(AuthError::Api { status, summary });
        }

        let rows: Vec<ProfileRow> = response.json().await?;
        Ok(!rows.is_empty())
    }
}
