//! One sync run: locate → resolve → scan → reconcile → persist
//!
//! Discovery coming up empty is a normal outcome, reported through the status
//! log. Only failing to write the catalog is an error.

use crate::catalog::{apply_merge, plan_merge, AppEntry, Catalog};
use crate::config::SyncConfig;
use crate::io::StatusLog;
use crate::steam::library::dedup_into;
use crate::steam::{find_library_roots, resolve_library_folders, ScanResult};
use crate::Result;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// No Steam root found
    NoLibraries,
    /// Roots found but no readable manifests
    NoManifests,
    /// Every discovered game is already in the catalog
    UpToDate,
    /// New games found, nothing written
    DryRun,
    /// New games written to the catalog
    Updated,
}

/// What discovery found
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    pub roots: Vec<PathBuf>,
    pub library_folders: Vec<PathBuf>,
    pub apps: ScanResult,
}

/// Outcome of a sync run
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub status: SyncStatus,
    pub discovery: Discovery,
    /// Entries added (or that would be added on a dry run)
    pub new_entries: Vec<AppEntry>,
    /// Backup written before the catalog was replaced
    pub backup_file: Option<PathBuf>,
    /// Status lines emitted during the run
    pub messages: Vec<String>,
}

/// Find Steam roots, expand them into library folders and read every manifest.
/// Folders are scanned in a fixed order so duplicate app ids resolve the same
/// way on every run.
pub fn discover(config: &SyncConfig, log: &StatusLog) -> Discovery {
    let roots = find_library_roots(config.steam_root.as_deref(), config.home_dir.as_deref());
    if roots.is_empty() {
        match &config.steam_root {
            Some(root) => log.emit(format!("Steam root {} does not exist", root.display())),
            None => log.emit("No Steam installation found"),
        }
        return Discovery::default();
    }

    for root in &roots {
        log.emit(format!("Using Steam root {}", root.display()));
    }

    let mut library_folders = Vec::new();
    let mut seen = HashSet::new();
    for root in &roots {
        dedup_into(&mut library_folders, &mut seen, resolve_library_folders(root));
    }
    info!("Resolved {} library folders", library_folders.len());

    let apps = ScanResult::scan_folders(&library_folders);
    if apps.is_empty() {
        log.emit("No Steam games found");
    } else {
        log.emit(format!("Found {} installed Steam games", apps.len()));
    }

    Discovery {
        roots,
        library_folders,
        apps,
    }
}

/// Run a full sync for `config`
pub fn run(config: &SyncConfig, log: &StatusLog) -> Result<SyncReport> {
    let discovery = discover(config, log);

    let finish = |status: SyncStatus,
                  new_entries: Vec<AppEntry>,
                  backup_file: Option<PathBuf>,
                  discovery: Discovery| SyncReport {
        status,
        discovery,
        new_entries,
        backup_file,
        messages: log.messages(),
    };

    if discovery.roots.is_empty() {
        return Ok(finish(SyncStatus::NoLibraries, Vec::new(), None, discovery));
    }
    if discovery.apps.is_empty() {
        return Ok(finish(SyncStatus::NoManifests, Vec::new(), None, discovery));
    }

    let mut catalog = Catalog::load(&config.catalog_path);
    let plan = plan_merge(&catalog, &discovery.apps);

    if plan.is_empty() {
        log.emit("Catalog already up to date, nothing to do");
        return Ok(finish(SyncStatus::UpToDate, Vec::new(), None, discovery));
    }

    for entry in &plan.new_entries {
        log.emit(format!("New game: {} ({})", entry.name, entry.steam_appid));
    }

    if config.dry_run {
        log.emit(format!(
            "Dry run: {} games would be added to {}",
            plan.len(),
            config.catalog_path.display()
        ));
        return Ok(finish(SyncStatus::DryRun, plan.new_entries, None, discovery));
    }

    apply_merge(&mut catalog, &plan)?;
    let backup_file = catalog.save(&config.catalog_path, config.backup)?;
    if let Some(bak) = &backup_file {
        log.emit(format!("Previous catalog saved to {}", bak.display()));
    }
    log.emit(format!(
        "Added {} games to {}",
        plan.len(),
        config.catalog_path.display()
    ));

    Ok(finish(SyncStatus::Updated, plan.new_entries, backup_file, discovery))
}
