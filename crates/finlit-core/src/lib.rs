//! Core types, configuration, and utilities shared by the finlit client.

mod config;
mod error;
mod logging;
mod paths;

pub use config::{Config, DEFAULT_API_URL, DEFAULT_LOG_LEVEL, DEFAULT_SUPABASE_URL};
pub use error::{CoreError, CoreResult};
pub use logging::init_logging;
pub use paths::Paths;
