use crate::io::paths::{self, CatalogPaths};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Resolved settings for one sync run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Catalog file to merge into
    pub catalog_path: PathBuf,

    /// Use this Steam root instead of searching the well-known locations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steam_root: Option<PathBuf>,

    /// Home directory the well-known locations are relative to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_dir: Option<PathBuf>,

    /// Compute and report, but never write
    #[serde(default)]
    pub dry_run: bool,

    /// Copy the previous catalog to `<catalog>.bak` before writing
    #[serde(default = "default_backup")]
    pub backup: bool,

    /// Append status lines to the log file next to the catalog
    #[serde(default)]
    pub log_to_file: bool,
}

fn default_backup() -> bool {
    true
}

impl SyncConfig {
    /// Config for an explicit catalog file, with the user's home directory
    pub fn for_catalog(catalog_path: impl Into<PathBuf>) -> Self {
        Self {
            catalog_path: catalog_path.into(),
            steam_root: None,
            home_dir: paths::home_dir(),
            dry_run: false,
            backup: default_backup(),
            log_to_file: false,
        }
    }

    /// Config for the catalog in Sunshine's default location
    pub fn from_default_location() -> Result<Self> {
        Ok(Self::for_catalog(CatalogPaths::new()?.catalog_file))
    }

    pub fn with_steam_root(mut self, root: Option<PathBuf>) -> Self {
        self.steam_root = root;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn with_log_to_file(mut self, log_to_file: bool) -> Self {
        self.log_to_file = log_to_file;
        self
    }

    pub fn paths(&self) -> CatalogPaths {
        CatalogPaths::for_catalog(&self.catalog_path)
    }

    /// Where status lines are appended, if file logging is on
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_to_file.then(|| self.paths().log_file())
    }
}
