//! Onboarding command: pick a base profile, create the financial profile
//! and its simulated accounts.

use crate::app::AppState;
use crate::notice::NoticeSeverity;
use finlit_auth::SessionStore;
use tracing::info;

/// List the base profiles, or onboard with the chosen one.
pub async fn run(state: &AppState, profile_id: Option<i64>) -> Result<(), Box<dyn std::error::Error>> {
    let Some(session) = state.auth.get_session().await? else {
        println!("Not signed in. Use `finlit login --email <email>` first.");
        return Ok(());
    };

    let profiles = state.api.base_profiles().await?;

    let Some(profile_id) = profile_id else {
        println!("Available starting profiles:");
        for profile in &profiles {
            println!(
                "  [{}] {}: income {:.2}, expenses {:.2}, debt {:.2}",
                profile.id,
                profile.profile_name,
                profile.starting_income,
                profile.starting_expenses,
                profile.starting_debt,
            );
            if let Some(description) = &profile.description {
                println!("      {}", description);
            }
        }
        println!("Re-run with `finlit onboard --profile <id>` to choose one.");
        return Ok(());
    };

    if !profiles.iter().any(|p| p.id == profile_id) {
        return Err(format!("No base profile with id {}", profile_id).into());
    }

    let created = state
        .api
        .create_financial_profile(&session.user.id, profile_id)
        .await?;
    let profile = created.user_financial_profile;
    info!(profile_id = %profile.id, "Financial profile created");

    let accounts = state
        .api
        .create_accounts(&profile.id, profile.current_income)
        .await?;

    state
        .notices
        .show("Onboarding complete", Some(NoticeSeverity::Success));
    println!(
        "Created financial profile {} with {} account(s).",
        profile.id,
        accounts.accounts.len()
    );

    Ok(())
}
