//! Sign-out command.

use crate::app::AppState;
use finlit_auth::SessionStore;
use tracing::info;

/// Invalidate the current session and stop the refresh chain.
pub async fn run(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    state.lifecycle.shutdown();
    state.auth.sign_out().await?;
    info!("Signed out");
    println!("Signed out.");
    Ok(())
}
