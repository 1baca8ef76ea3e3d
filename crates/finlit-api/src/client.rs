//! Backend REST API client.
//!
//! Thin wrappers over the finlit backend endpoints: accounts, transactions,
//! goals, base profiles, and registration.

use crate::error::{ApiError, ApiResult};
use crate::types::{
    AccountRef, BalanceResponse, BaseProfile, CreatedAccounts, CreatedProfile, GoalsResponse,
    RegisteredUser, Transaction, TransactionBatch,
};
use serde::Serialize;

/// Client for the finlit backend REST API.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    api_url: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountsRequest<'a> {
    user_profile_id: &'a str,
    user_profile_current_income: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateTransactionsRequest<'a> {
    account_id: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateProfileRequest<'a> {
    user_id: &'a str,
    selected_profile_id: i64,
}

#[derive(Debug, Serialize)]
struct RegisterRequest<'a> {
    email: &'a str,
    password: &'a str,
    name: &'a str,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Arguments
    /// * `api_url` - Base URL of the backend API (e.g. `https://api.finlit.app`)
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            api_url: api_url.into(),
        }
    }

    /// Build the URL for an endpoint path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    /// Convert a non-2xx response into an `ApiError::Status`, preferring the
    /// server's `message` field.
    async fn status_error(response: reqwest::Response) -> ApiError {
        let status = response.status();
        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or(status.as_str())
                .to_string(),
            Err(_) => status.to_string(),
        };
        tracing::error!(status = %status, message = %message, "Backend API request failed");
        ApiError::Status { status, message }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "GET");

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "POST");

        let response = self
            .http_client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }
        Ok(response.json().await?)
    }

    /// Create the simulated accounts for a newly onboarded profile.
    pub async fn create_accounts(
        &self,
        user_profile_id: &str,
        current_income: f64,
    ) -> ApiResult<CreatedAccounts> {
        self.post_json(
            "accounts",
            &CreateAccountsRequest {
                user_profile_id,
                user_profile_current_income: current_income,
            },
        )
        .await
    }

    /// Look up the account belonging to a user.
    pub async fn account_for_user(&self, user_id: &str) -> ApiResult<AccountRef> {
        self.get_json(&format!("accounts/user/{}", user_id)).await
    }

    /// Current balance of an account.
    pub async fn account_balance(&self, account_id: &str) -> ApiResult<BalanceResponse> {
        self.get_json(&format!("accounts/{}/balance", account_id))
            .await
    }

    /// Generate a fresh batch of transactions for an account.
    pub async fn generate_transactions(&self, account_id: &str) -> ApiResult<TransactionBatch> {
        self.post_json("transactions", &GenerateTransactionsRequest { account_id })
            .await
    }

    /// Transaction history for an account.
    pub async fn transactions_for_account(
        &self,
        account_id: &str,
    ) -> ApiResult<Vec<Transaction>> {
        self.get_json(&format!("transactions/account/{}", account_id))
            .await
    }

    /// Budget goals and the budget split for a user.
    pub async fn goals_for_user(&self, user_id: &str) -> ApiResult<GoalsResponse> {
        self.get_json(&format!("goals/user/{}", user_id)).await
    }

    /// The selectable base profiles offered during onboarding.
    pub async fn base_profiles(&self) -> ApiResult<Vec<BaseProfile>> {
        self.get_json("profiles").await
    }

    /// Create a financial profile for a user from a selected base profile.
    pub async fn create_financial_profile(
        &self,
        user_id: &str,
        selected_profile_id: i64,
    ) -> ApiResult<CreatedProfile> {
        self.post_json(
            "profiles",
            &CreateProfileRequest {
                user_id,
                selected_profile_id,
            },
        )
        .await
    }

    /// Register a new user with the backend. `google` selects the
    /// provider-assisted registration path.
    pub async fn register_user(
        &self,
        email: &str,
        name: &str,
        password: &str,
        google: bool,
    ) -> ApiResult<RegisteredUser> {
        let path = if google {
            "auth/register?method=google"
        } else {
            "auth/register"
        };
        self.post_json(
            path,
            &RegisterRequest {
                email,
                password,
                name,
            },
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = ApiClient::new("https://api.finlit.app");
        assert_eq!(client.api_url, "https://api.finlit.app");
    }

    #[test]
    fn test_endpoint() {
        let client = ApiClient::new("https://api.finlit.app");
        assert_eq!(
            client.endpoint("transactions/account/acc-1"),
            "https://api.finlit.app/transactions/account/acc-1"
        );
        assert_eq!(
            client.endpoint("auth/register?method=google"),
            "https://api.finlit.app/auth/register?method=google"
        );
    }

    #[test]
    fn create_accounts_request_uses_camel_case() {
        let body = CreateAccountsRequest {
            user_profile_id: "profile-1",
            user_profile_current_income: 1800.0,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["userProfileId"], "profile-1");
        assert_eq!(json["userProfileCurrentIncome"], 1800.0);
    }

    #[test]
    fn create_profile_request_uses_camel_case() {
        let body = CreateProfileRequest {
            user_id: "u1",
            selected_profile_id: 3,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["userId"], "u1");
        assert_eq!(json["selectedProfileId"], 3);
    }

    #[test]
    fn register_request_field_names() {
        let body = RegisterRequest {
            email: "u@example.com",
            password: "secret",
            name: "Avery",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["email"], "u@example.com");
        assert_eq!(json["name"], "Avery");
    }
}
