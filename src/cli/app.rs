use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// steam-catalog-sync: add installed Steam games to Sunshine
#[derive(Parser)]
#[command(name = "steam-catalog-sync")]
#[command(version)]
#[command(about = "Add installed Steam games to a Sunshine apps.json catalog")]
#[command(
    long_about = "Finds Steam libraries, reads their app manifests and appends every game not yet in Sunshine's apps.json. Existing entries are never changed or removed."
)]
pub struct Cli {
    /// Diagnostic log level (written to stderr)
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive for `tracing_subscriber::EnvFilter`
    pub fn to_filter_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Merge newly installed Steam games into the catalog
    Sync {
        /// Catalog file (defaults to Sunshine's apps.json)
        #[arg(short, long)]
        catalog: Option<PathBuf>,

        /// Steam root to use instead of the well-known locations
        #[arg(short, long)]
        steam_root: Option<PathBuf>,

        /// Dry run - show what would be added without writing
        #[arg(short, long)]
        dry_run: bool,

        /// Do not copy the previous catalog to <catalog>.bak
        #[arg(long)]
        no_backup: bool,

        /// Append status lines to steam-catalog-sync.log next to the catalog
        #[arg(short, long)]
        log: bool,
    },

    /// List installed Steam games without touching the catalog
    Scan {
        /// Steam root to use instead of the well-known locations
        #[arg(short, long)]
        steam_root: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

impl Commands {
    /// Get the command name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Commands::Sync { .. } => "sync",
            Commands::Scan { .. } => "scan",
        }
    }
}
