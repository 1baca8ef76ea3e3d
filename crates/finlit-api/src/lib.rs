//! REST clients for the finlit backend API and Supabase data tables.
//!
//! [`ApiClient`] wraps the backend endpoints the pages consume (accounts,
//! transactions, goals, profiles, registration). [`ProfileDirectory`] answers
//! the startup gate's "has a financial profile been created?" question via
//! the Supabase PostgREST API.

mod client;
mod error;
mod profiles;
mod types;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult};
pub use profiles::ProfileDirectory;
pub use types::{
    AccountRef, BalanceResponse, BaseProfile, BudgetSplit, CreatedAccounts, CreatedProfile, Goal,
    GoalNotification, GoalNotificationKind, GoalsResponse, RegisteredUser, Transaction,
    TransactionBatch, TransactionCategory, UserFinancialProfile,
};
