use clap::Parser;
use steam_catalog_sync::{
    cli::commands::{scan::ScanCommand, sync::SyncCommand, CommandHandler},
    cli::{Cli, Commands, LogLevel},
    Result,
};
use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr; stdout carries status lines and scan output.
/// `RUST_LOG` takes precedence over `--log-level` when set.
fn initialize_tracing(log_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_filter_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_level);

    let command: Box<dyn CommandHandler> = match cli.command {
        Commands::Sync {
            catalog,
            steam_root,
            dry_run,
            no_backup,
            log,
        } => Box::new(SyncCommand::new(catalog, steam_root, dry_run, !no_backup, log)),
        Commands::Scan { steam_root, format } => Box::new(ScanCommand::new(steam_root, format)),
    };

    tracing::debug!("Running {} command", command.name());
    command.execute()
}
