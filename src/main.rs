use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use coinfolio::app::{run, RunOptions};
use coinfolio::config::{default_config_path, ResolvedConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "coinfolio")]
#[command(about = "Incremental Coinbase ledger sync and portfolio valuation")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Sync the ledger and write the valuation report
    Run {
        /// Re-fetch the accounts listing even if a local dataset exists
        #[arg(long)]
        refresh_accounts: bool,

        /// Re-fetch transaction listings even if a local dataset exists
        #[arg(long)]
        refresh_transactions: bool,

        /// Include outgoing transfers in the valuation
        #[arg(long)]
        include_sent: bool,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    match execute(cli, &config_path).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("run failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn execute(cli: Cli, config_path: &Path) -> anyhow::Result<()> {
    let config = ResolvedConfig::load_or_default(config_path)?;

    match cli.command {
        Some(Command::Config) => {
            println!("Config file: {}", config_path.display());
            println!("Data directory: {}", config.data_dir.display());
            println!("Output directory: {}", config.output_dir.display());
            println!("Quote currency: {}", config.quote_currency);
            Ok(())
        }
        Some(Command::Run {
            refresh_accounts,
            refresh_transactions,
            include_sent,
        }) => {
            run(
                &config,
                RunOptions {
                    refresh_accounts,
                    refresh_transactions,
                    include_sent,
                },
            )
            .await
        }
        None => run(&config, RunOptions::default()).await,
    }
}
