use super::CommandHandler;
use crate::config::SyncConfig;
use crate::io::paths;
use crate::io::StatusLog;
use crate::pipeline;
use crate::steam::DiscoveredApp;
use crate::{Result, SyncError};
use std::path::PathBuf;

/// Handler for the `scan` command
pub struct ScanCommand {
    pub steam_root: Option<PathBuf>,
    pub format: String,
}

impl CommandHandler for ScanCommand {
    fn execute(&self) -> Result<()> {
        let json = match self.format.as_str() {
            "text" => false,
            "json" => true,
            other => {
                return Err(SyncError::Config(format!(
                    "Unknown output format '{}', expected text or json",
                    other
                )))
            }
        };

        // The catalog is never read or written by a scan
        let config = SyncConfig::for_catalog(paths::CATALOG_FILE_NAME)
            .with_steam_root(self.steam_root.clone());

        let log = if json {
            StatusLog::silent()
        } else {
            StatusLog::console(None)
        };
        let discovery = pipeline::discover(&config, &log);
        let apps: Vec<&DiscoveredApp> = discovery.apps.iter().collect();

        if json {
            println!("{}", serde_json::to_string_pretty(&apps)?);
        } else {
            for app in apps {
                println!(
                    "{:>10}  {}  ({})",
                    app.appid(),
                    app.manifest.display_name(),
                    app.library_folder.display()
                );
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "scan"
    }
}

impl ScanCommand {
    /// Create new scan command
    pub fn new(steam_root: Option<PathBuf>, format: String) -> Self {
        Self { steam_root, format }
    }
}
