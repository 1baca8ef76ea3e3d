//! Response and record types for the backend API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Spending category a transaction falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionCategory {
    Needs,
    Wants,
    Savings,
}

/// A single account transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub category: TransactionCategory,
    pub amount: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Kind of goal progress notification emitted by transaction generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalNotificationKind {
    GoalCompleted,
    GoalNearlyCompleted,
}

/// Goal progress notification attached to a generated transaction batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalNotification {
    #[serde(rename = "type")]
    pub kind: GoalNotificationKind,
    pub message: String,
    #[serde(rename = "goalName")]
    pub goal_name: Option<String>,
    #[serde(rename = "firstTimeCompletion", default)]
    pub first_time_completion: bool,
}

/// Result of generating a batch of transactions for an account.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionBatch {
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub notifications: Vec<GoalNotification>,
}

/// A budget goal and its progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_progress: f64,
    #[serde(rename = "type")]
    pub goal_type: String,
}

/// Budget allocation across the three spending categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSplit {
    pub needs_budget: f64,
    pub wants_budget: f64,
    pub savings_budget: f64,
}

/// Goals plus the budget split they are measured against.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalsResponse {
    pub goals: Vec<Goal>,
    #[serde(rename = "financialProfile")]
    pub financial_profile: BudgetSplit,
}

/// A selectable starting profile offered during onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseProfile {
    pub id: i64,
    pub profile_name: String,
    pub description: Option<String>,
    pub starting_income: f64,
    pub starting_expenses: f64,
    pub starting_debt: f64,
    pub goals: Option<String>,
}

/// The financial profile created for a user during onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserFinancialProfile {
    pub id: String,
    pub current_income: f64,
}

/// Response to creating a financial profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedProfile {
    #[serde(rename = "userFinancialProfile")]
    pub user_financial_profile: UserFinancialProfile,
}

/// Response to creating the simulated accounts for a profile.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedAccounts {
    pub accounts: Vec<AccountRef>,
}

/// Minimal account handle.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRef {
    #[serde(rename = "accountId")]
    pub account_id: String,
}

/// Current balance of an account.
#[derive(Debug, Clone, Deserialize)]
pub struct BalanceResponse {
    pub balance: f64,
}

/// Response to registering a new user with the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
}
