//! finlit - financial-literacy client for the finlit backend and Supabase auth.

mod app;
mod commands;
mod notice;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use finlit_core::{init_logging, Config, Paths};

/// finlit command-line interface.
#[derive(Parser)]
#[command(name = "finlit")]
#[command(about = "Financial-literacy client with managed session lifecycle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Base directory for runtime files (config, logs). Defaults to ~/.finlit
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with email and password, then keep the session fresh
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Register a new account with the backend
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,
        /// Full name
        #[arg(short, long)]
        name: String,
        /// Register via the Google-assisted path
        #[arg(long)]
        google: bool,
    },
    /// Sign out and invalidate the session
    Logout,
    /// Show the current session and profile state
    Status,
    /// Choose a starting profile and create the financial profile and accounts
    Onboard {
        /// Base profile id to onboard with; omit to list the available profiles
        #[arg(long)]
        profile: Option<i64>,
    },
    /// Show the account balance and transaction history
    Transactions {
        /// Generate a fresh batch of transactions first
        #[arg(long)]
        generate: bool,
    },
    /// Show budget goals and their progress
    Goals,
    /// Run the startup check and keep the session fresh until interrupted
    Run,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let paths = match cli.base_dir {
        Some(base) => Paths::with_base_dir(base),
        None => Paths::new()?,
    };
    let config = Config::load(&paths)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging(level);

    let state = app::AppState::new(config, &paths);

    match cli.command {
        Some(Commands::Login { email }) => {
            commands::login::run(&state, &email).await?;
        }
        Some(Commands::Register {
            email,
            name,
            google,
        }) => {
            commands::register::run(&state, &email, &name, google).await?;
        }
        Some(Commands::Logout) => {
            commands::logout::run(&state).await?;
        }
        Some(Commands::Status) => {
            commands::status::run(&state).await?;
        }
        Some(Commands::Onboard { profile }) => {
            commands::onboard::run(&state, profile).await?;
        }
        Some(Commands::Transactions { generate }) => {
            commands::transactions::run(&state, generate).await?;
        }
        Some(Commands::Goals) => {
            commands::goals::run(&state).await?;
        }
        Some(Commands::Run) | None => {
            commands::run::run(&state).await?;
        }
    }

    Ok(())
}
