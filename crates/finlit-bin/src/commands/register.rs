//! Account registration command.

use crate::app::AppState;
use crate::notice::NoticeSeverity;
use std::io::Write;
use tracing::info;

/// Register a new account with the backend.
pub async fn run(
    state: &AppState,
    email: &str,
    name: &str,
    google: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let password = prompt_password()?;

    match state.api.register_user(email, name, &password, google).await {
        Ok(user) => {
            info!(user_id = %user.id, "Registered");
            state.notices.show(
                "Registration successful",
                Some(NoticeSeverity::Success),
            );
            println!("Registered {}. Sign in with `finlit login --email {}`.", user.email, email);
            Ok(())
        }
        Err(err) => {
            state
                .notices
                .show(err.to_string(), Some(NoticeSeverity::Error));
            eprintln!("Registration failed: {}", err);
            Err(err.into())
        }
    }
}

fn prompt_password() -> std::io::Result<String> {
    print!("Password: ");
    std::io::stdout().flush()?;
    let mut password = String::new();
    std::io::stdin().read_line(&mut password)?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}
