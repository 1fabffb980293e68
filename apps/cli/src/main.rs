//! hardhat-forge - run forge tests for a Hardhat project against a pinned toolchain.

mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

/// Install a pinned forge revision and run its tests for a Hardhat project.
#[derive(Parser)]
#[command(name = "hardhat-forge")]
#[command(about = "Install a pinned forge toolchain and run forge tests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Project directory (where forge runs and hardhat-artifacts lives)
    #[arg(long, default_value = ".", global = true)]
    project_dir: PathBuf,

    /// Config file (defaults to <project-dir>/forge.config.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "FORGE_LOG_LEVEL", global = true)]
    log_level: String,

    /// Also append structured JSONL logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Install the configured revision if missing, then run forge clean and forge test
    #[command(name = "forge-test")]
    ForgeTest {
        /// Revision to require (overrides the config file)
        #[arg(long)]
        revision: Option<String>,
        /// forge test verbosity (overrides the config file)
        #[arg(long)]
        verbosity: Option<u32>,
        /// Fail when cleaning or testing fails instead of only logging it
        #[arg(long)]
        strict: bool,
    },

    /// Reinstall the configured revision with --force
    #[command(name = "forge-install")]
    ForgeInstall {
        /// Revision to install (overrides the config file)
        #[arg(long)]
        revision: Option<String>,
    },

    /// Show the installed and configured forge revisions
    Status {
        /// Revision to compare against (overrides the config file)
        #[arg(long)]
        revision: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    observability::init_with_config(observability::LogConfig {
        service_name: "hardhat-forge".into(),
        default_level: cli.log_level.clone(),
        log_path: cli.log_file.clone(),
        also_stderr: true,
    });

    let ctx = commands::CommandContext {
        project_dir: cli.project_dir,
        config_path: cli.config,
        format: cli.format,
    };
    debug!(project_dir = %ctx.project_dir.display(), "Starting");

    let result = match cli.command {
        Commands::ForgeTest {
            revision,
            verbosity,
            strict,
        } => commands::forge_test(&ctx, revision, verbosity, strict).await,
        Commands::ForgeInstall { revision } => commands::forge_install(&ctx, revision).await,
        Commands::Status { revision } => commands::status(&ctx, revision).await,
    };

    if let Err(e) = result {
        output::print_error(&e, &ctx.format);
        std::process::exit(1);
    }
}
