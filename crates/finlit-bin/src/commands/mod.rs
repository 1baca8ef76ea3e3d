//! CLI command handlers.

pub mod goals;
pub mod login;
pub mod logout;
pub mod onboard;
pub mod register;
pub mod run;
pub mod status;
pub mod transactions;
