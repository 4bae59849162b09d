use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod context;
mod logging;

use commands::generate::GenerateArgs;
use commands::history::HistoryAction;
use context::StorageOptions;

#[derive(Parser)]
#[command(name = "promptforge")]
#[command(version, about = "PromptForge - turn a rough idea into an optimized LLM prompt", long_about = None)]
struct Cli {
    /// Root directory for config, secrets, history and logs
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Keep history in memory for this run only
    #[arg(long, global = true)]
    ephemeral: bool,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Optimize an idea into a structured prompt
    Generate(GenerateArgs),
    /// List starter templates
    Templates,
    /// Browse, replay and delete past generations
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },
    /// Create config.toml and a secret.json skeleton
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let options = StorageOptions {
        data_dir: cli.data_dir,
        ephemeral: cli.ephemeral,
    };

    let paths = options.paths();
    let logs_dir = paths.logs_dir().ok();
    let _log_guard = logging::init_logging(logs_dir.as_deref(), cli.verbose);
    tracing::debug!("PromptForge {} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Templates => commands::templates::run(),
        Commands::Init => commands::init::run(&paths)?,
        Commands::Generate(args) => {
            let ctx = context::bootstrap(&options)?;
            commands::generate::run(&ctx, args).await?;
        }
        Commands::History { action } => {
            let ctx = context::bootstrap(&options)?;
            commands::history::run(&ctx, action).await?;
        }
    }

    Ok(())
}
