//! Goals command: budget split and goal progress.

use crate::app::AppState;
use finlit_api::Goal;
use finlit_auth::SessionStore;

/// Print the budget split and the progress of each goal.
pub async fn run(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let Some(session) = state.auth.get_session().await? else {
        println!("Not signed in. Use `finlit login --email <email>` first.");
        return Ok(());
    };

    let response = state.api.goals_for_user(&session.user.id).await?;
    let split = &response.financial_profile;
    println!(
        "Budgets: needs {:.2}, wants {:.2}, savings {:.2}",
        split.needs_budget, split.wants_budget, split.savings_budget
    );

    if response.goals.is_empty() {
        println!("No goals yet.");
        return Ok(());
    }

    for goal in &response.goals {
        let status = if goal.current_progress > goal.target_amount {
            "limit exceeded".to_string()
        } else {
            format!("{:.1}%", goal_percentage(goal))
        };
        println!(
            "  {:<24} {:.2} of {:.2} ({})",
            goal.name, goal.current_progress, goal.target_amount, status
        );
    }

    Ok(())
}

/// Progress toward a goal, capped at 100%.
fn goal_percentage(goal: &Goal) -> f64 {
    if goal.target_amount <= 0.0 {
        return 0.0;
    }
    (goal.current_progress / goal.target_amount * 100.0).min(100.0)
}
