use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cashplan::cli::{
    handle_budget, handle_import, handle_init, handle_status, handle_trend, PeriodArgs,
};
use cashplan::config::WorkspacePaths;

#[derive(Parser)]
#[command(
    name = "cashplan",
    version,
    about = "Personal-finance analysis: budget plans vs. actual spending",
    long_about = "cashplan compares versioned budget plans against imported bank \
                  statements: income waterfall, savings coverage, per-category \
                  variance and spending trends, all in exact decimal arithmetic."
)]
struct Cli {
    /// Workspace directory
    #[arg(long, global = true, default_value = ".", env = "CASHPLAN_WORKSPACE")]
    workspace: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new workspace
    Init,

    /// Import a CSV statement into the ledger
    Import {
        /// Path to the CSV file
        file: PathBuf,
    },

    /// Show aggregates, cumulative metrics and category variance
    Status {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Show the projected budget for a period
    Budget {
        #[command(flatten)]
        period: PeriodArgs,
    },

    /// Show moving-average spending trends
    Trend {
        #[command(flatten)]
        period: PeriodArgs,

        /// Number of prior periods to average over
        #[arg(long)]
        window: Option<usize>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let paths = WorkspacePaths::new(&cli.workspace);

    match cli.command {
        Commands::Init => handle_init(&paths)?,
        Commands::Import { file } => handle_import(&paths, &file)?,
        Commands::Status { period } => handle_status(&paths, &period)?,
        Commands::Budget { period } => handle_budget(&paths, &period)?,
        Commands::Trend { period, window } => handle_trend(&paths, &period, window)?,
    }

    Ok(())
}
