//! Transactions command: balance and history, with optional generation of
//! a fresh batch.

use crate::app::AppState;
use crate::notice::NoticeSeverity;
use finlit_api::{GoalNotification, GoalNotificationKind, TransactionCategory};
use finlit_auth::SessionStore;

/// Show the account balance and transaction history, generating a new
/// batch first when `generate` is set.
pub async fn run(state: &AppState, generate: bool) -> Result<(), Box<dyn std::error::Error>> {
    let Some(session) = state.auth.get_session().await? else {
        println!("Not signed in. Use `finlit login --email <email>` first.");
        return Ok(());
    };

    let account = state.api.account_for_user(&session.user.id).await?;

    if generate {
        let batch = state.api.generate_transactions(&account.account_id).await?;
        println!("Generated {} transaction(s).", batch.transactions.len());

        let summary = summarize_notifications(&batch.notifications);
        if !summary.is_empty() {
            state
                .notices
                .show(summary.clone(), Some(NoticeSeverity::Success));
            println!("{}", summary);
        }
    }

    let balance = state.api.account_balance(&account.account_id).await?;
    let transactions = state
        .api
        .transactions_for_account(&account.account_id)
        .await?;

    println!("Balance: {:.2}", balance.balance);
    for tx in &transactions {
        println!(
            "  {}  {:<8} {:>10.2}  {}",
            tx.created_at.format("%Y-%m-%d"),
            category_label(tx.category),
            tx.amount,
            tx.description,
        );
    }

    Ok(())
}

fn category_label(category: TransactionCategory) -> &'static str {
    match category {
        TransactionCategory::Needs => "needs",
        TransactionCategory::Wants => "wants",
        TransactionCategory::Savings => "savings",
    }
}

/// One-line summary of the goal notifications attached to a generated
/// batch, suitable for the notice banner.
fn summarize_notifications(notifications: &[GoalNotification]) -> String {
    if notifications.is_empty() {
        return String::new();
    }

    let completed: Vec<&GoalNotification> = notifications
        .iter()
        .filter(|n| n.kind == GoalNotificationKind::GoalCompleted)
        .collect();
    let nearly: Vec<&GoalNotification> = notifications
        .iter()
        .filter(|n| n.kind == GoalNotificationKind::GoalNearlyCompleted)
        .collect();

    let mut parts = Vec::new();
    if !completed.is_empty() {
        let names: Vec<&str> = completed
            .iter()
            .filter_map(|n| n.goal_name.as_deref())
            .collect();
        parts.push(format!(
            "You have completed {} goal(s): {}.",
            completed.len(),
            names.join(", ")
        ));
    }
    if !nearly.is_empty() {
        let names: Vec<&str> = nearly
            .iter()
            .filter_map(|n| n.goal_name.as_deref())
            .collect();
        parts.push(format!(
            "You have nearly completed {} goal(s): {}.",
            nearly.len(),
            names.join(", ")
        ));
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notification(kind: GoalNotificationKind, name: &str) -> GoalNotification {
        GoalNotification {
            kind,
            message: String::new(),
            goal_name: Some(name.to_string()),
            first_time_completion: false,
        }
    }

    #[test]
    fn no_notifications_gives_empty_summary() {
        assert_eq!(summarize_notifications(&[]), "");
    }

    #[test]
    fn completed_goals_are_named_and_counted() {
        let summary = summarize_notifications(&[
            notification(GoalNotificationKind::GoalCompleted, "Holiday fund"),
            notification(GoalNotificationKind::GoalCompleted, "Emergency fund"),
        ]);
        assert_eq!(
            summary,
            "You have completed 2 goal(s): Holiday fund, Emergency fund."
        );
    }

    #[test]
    fn mixed_notifications_mention_both_kinds() {
        let summary = summarize_notifications(&[
            notification(GoalNotificationKind::GoalCompleted, "Holiday fund"),
            notification(GoalNotificationKind::GoalNearlyCompleted, "New laptop"),
        ]);
        assert!(summary.contains("completed 1 goal(s): Holiday fund."));
        assert!(summary.contains("nearly completed 1 goal(s): New laptop."));
    }
}
