use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use studyflow::store::{Storage, Store};

mod cli;

#[derive(Parser)]
#[command(name = "studyflow")]
#[command(about = "Gamified study planner - sessions, streaks, coins and pets")]
#[command(version)]
struct Cli {
    /// Data directory (defaults to ~/.studyflow)
    #[arg(short, long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show coins, streak, pets, achievements and today's insights
    Status,

    /// Record a visit for today: advance the streak and claim the daily
    /// bonus and lucky coin
    Visit,

    /// Mark a session complete and collect its reward
    Complete {
        /// Id of the session to complete
        session_id: String,

        /// How hard it felt: easy, medium or hard
        #[arg(long)]
        felt: Option<String>,
    },

    /// Feed a pet
    Feed {
        /// Id of the pet to feed (e.g. pet-turtle)
        pet_id: String,

        /// Food type: normal (5 coins) or premium (15 coins)
        #[arg(long, default_value = "normal")]
        food: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let storage = match cli.data_dir {
        Some(dir) => Storage::new(dir),
        None => Storage::open_default(),
    };
    let mut store = Store::load(storage);

    match cli.command {
        Some(Commands::Visit) => {
            cli::visit::visit_command(&mut store)?;
        }
        Some(Commands::Complete { session_id, felt }) => {
            cli::complete::complete_command(&mut store, &session_id, felt.as_deref())?;
        }
        Some(Commands::Feed { pet_id, food }) => {
            cli::feed::feed_command(&mut store, &pet_id, &food)?;
        }
        Some(Commands::Status) | None => {
            // Default: show the dashboard
            cli::status::status_command(&store)?;
        }
    }

    Ok(())
}
