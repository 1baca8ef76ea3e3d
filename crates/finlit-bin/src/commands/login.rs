//! Password sign-in command.

use crate::app::AppState;
use crate::notice::NoticeSeverity;
use finlit_auth::StartupOutcome;
use std::io::Write;
use tracing::info;

/// Sign in with email and password, then run the startup check.
pub async fn run(state: &AppState, email: &str) -> Result<(), Box<dyn std::error::Error>> {
    let password = prompt_password()?;

    let session = match state.auth.sign_in_with_password(email, &password).await {
        Ok(session) => session,
        Err(err) => {
            state
                .notices
                .show(format!("Sign-in failed: {}", err), Some(NoticeSeverity::Error));
            eprintln!("Sign-in failed: {}", err);
            return Err(err.into());
        }
    };

    info!(user_id = %session.user.id, "Signed in");
    println!("Signed in as {}", session.user.email.as_deref().unwrap_or(email));

    match state.lifecycle.check_on_startup().await? {
        StartupOutcome::OnboardingRequired { route } => {
            println!("First sign-in detected; complete onboarding at {}", route);
            println!("Run `finlit onboard` to choose a starting profile.");
        }
        StartupOutcome::RefreshScheduled => {
            println!("Session saved; `finlit run` keeps it fresh in the background.");
        }
        _ => {}
    }

    Ok(())
}

fn prompt_password() -> std::io::Result<String> {
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}
