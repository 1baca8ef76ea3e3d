//! Foreground run command: startup gate, then keep the session fresh.

use crate::app::AppState;
use crate::notice::NoticeSeverity;
use finlit_auth::StartupOutcome;
use tracing::{info, warn};

/// Run the startup check and stay resident until interrupted.
pub async fn run(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    spawn_notice_printer(state);

    match state.lifecycle.check_on_startup().await? {
        StartupOutcome::Unauthenticated => {
            println!("Not signed in. Use `finlit login --email <email>` first.");
            return Ok(());
        }
        StartupOutcome::OnboardingRequired { route } => {
            state.notices.show(
                format!("Complete onboarding at {}", route),
                Some(NoticeSeverity::Info),
            );
            println!("First sign-in detected; complete onboarding at {}", route);
            println!("Run `finlit onboard` to choose a starting profile.");
            return Ok(());
        }
        StartupOutcome::AlreadyOnboarded => {
            // Matches the upstream flow: a just-linked identity that already
            // onboarded does not arm the refresh chain on this load.
            info!("Onboarding already complete");
            return Ok(());
        }
        StartupOutcome::RefreshScheduled => {
            info!("Refresh chain armed");
            println!("Session refresh active. Press Ctrl-C to stop.");
        }
        StartupOutcome::AlreadyRan => {
            warn!("Startup check had already run");
        }
    }

    tokio::signal::ctrl_c().await?;
    state.lifecycle.shutdown();
    info!("Shut down");

    Ok(())
}

/// Print banner notices as they change.
fn spawn_notice_printer(state: &AppState) {
    let mut rx = state.notices.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let notice = rx.borrow_and_update().clone();
            if notice.visible {
                match notice.severity {
                    NoticeSeverity::Error | NoticeSeverity::Warning => {
                        eprintln!("[{:?}] {}", notice.severity, notice.message)
                    }
                    _ => println!("[{:?}] {}", notice.severity, notice.message),
                }
            }
        }
    });
}
