use super::CommandHandler;
use crate::config::SyncConfig;
use crate::io::StatusLog;
use crate::pipeline::{self, SyncStatus};
use crate::Result;
use std::path::PathBuf;
use tracing::debug;

/// Handler for the `sync` command
pub struct SyncCommand {
    pub catalog: Option<PathBuf>,
    pub steam_root: Option<PathBuf>,
    pub dry_run: bool,
    pub backup: bool,
    pub log: bool,
}

impl CommandHandler for SyncCommand {
    fn execute(&self) -> Result<()> {
        let config = self.resolve_config()?;
        debug!("Resolved sync config: {:?}", config);

        let log = StatusLog::console(config.log_file());
        log.emit(format!("Catalog: {}", config.catalog_path.display()));

        let report = pipeline::run(&config, &log)?;

        if report.status == SyncStatus::DryRun {
            println!("\nWould add:");
            for entry in &report.new_entries {
                println!("{}", serde_json::to_string_pretty(entry)?);
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "sync"
    }
}

impl SyncCommand {
    /// Create new sync command
    pub fn new(
        catalog: Option<PathBuf>,
        steam_root: Option<PathBuf>,
        dry_run: bool,
        backup: bool,
        log: bool,
    ) -> Self {
        Self {
            catalog,
            steam_root,
            dry_run,
            backup,
            log,
        }
    }

    /// Build the run configuration, falling back to Sunshine's default catalog
    pub fn resolve_config(&self) -> Result<SyncConfig> {
        let config = match &self.catalog {
            Some(path) => SyncConfig::for_catalog(path),
            None => SyncConfig::from_default_location()?,
        };

        Ok(config
            .with_steam_root(self.steam_root.clone())
            .with_dry_run(self.dry_run)
            .with_backup(self.backup)
            .with_log_to_file(self.log))
    }
}
