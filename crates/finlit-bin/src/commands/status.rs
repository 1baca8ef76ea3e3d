//! Session status command.

use crate::app::AppState;
use finlit_auth::{epoch_now, SessionStore, REFRESH_BUFFER_SECS};

/// Print the current session state.
pub async fn run(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let Some(session) = state.auth.get_session().await? else {
        println!("Not signed in.");
        return Ok(());
    };

    let now = epoch_now();
    let remaining = session.remaining_secs(now);

    println!("Signed in as {}", session.user.email.as_deref().unwrap_or(&session.user.id));
    println!("  user id:    {}", session.user.id);
    println!("  expires in: {}s", remaining);
    if session.expires_within(now, REFRESH_BUFFER_SECS) {
        println!("  (inside the refresh buffer; a refresh is due)");
    }
    for identity in &session.user.identities {
        println!("  identity:   {} (linked {})", identity.provider, identity.created_at);
    }

    Ok(())
}
