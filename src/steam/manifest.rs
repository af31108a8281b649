//! App manifest discovery
//!
//! Each installed game has an `appmanifest_<appid>.acf` file directly inside its
//! library's `steamapps` folder. Only the app id is required; name and install
//! directory are picked up when present.

use super::keyvalues;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Glob for manifest files inside a library folder
pub const MANIFEST_PATTERN: &str = "appmanifest_*.acf";

/// Directory under a library folder holding game installs
pub const COMMON_DIR: &str = "common";

/// Fields read from one app manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppManifest {
    pub appid: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installdir: Option<String>,
}

impl AppManifest {
    /// Name shown in the catalog, synthesized from the app id when the manifest has none
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => fallback_name(self.appid),
        }
    }
}

/// Placeholder name for apps whose manifest carries no name
pub fn fallback_name(appid: u64) -> String {
    format!("steam-game-{}", appid)
}

/// Parse manifest text; `None` when no app id can be found
pub fn parse_manifest(text: &str) -> Option<AppManifest> {
    let appid = keyvalues::app_id(text)?;
    Some(AppManifest {
        appid,
        name: keyvalues::app_name(text),
        installdir: keyvalues::install_dir(text).filter(|dir| !dir.is_empty()),
    })
}

/// A manifest together with the library folder it was found in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscoveredApp {
    pub manifest: AppManifest,
    pub library_folder: PathBuf,
}

impl DiscoveredApp {
    pub fn appid(&self) -> u64 {
        self.manifest.appid
    }

    /// `<library>/common/<installdir>`, if the manifest names one and it exists on disk
    pub fn install_path(&self) -> Option<PathBuf> {
        let installdir = self.manifest.installdir.as_deref()?;
        let path = self.library_folder.join(COMMON_DIR).join(installdir);
        path.is_dir().then_some(path)
    }
}

/// List the manifest files directly inside `folder`, sorted by path
pub fn manifest_files(folder: &Path) -> Vec<PathBuf> {
    let pattern = format!(
        "{}/{}",
        glob::Pattern::escape(&folder.to_string_lossy()),
        MANIFEST_PATTERN
    );

    let mut files: Vec<PathBuf> = match glob::glob(&pattern) {
        Ok(paths) => paths
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .collect(),
        Err(e) => {
            debug!("Invalid manifest pattern {}: {}", pattern, e);
            Vec::new()
        }
    };
    files.sort();
    files
}

/// Read every manifest in one library folder. Unreadable files and files
/// without an app id are skipped.
pub fn scan_library_folder(folder: &Path) -> Vec<DiscoveredApp> {
    let mut apps = Vec::new();

    for file in manifest_files(folder) {
        let text = match fs::read(&file) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                debug!("Skipping unreadable manifest {:?}: {}", file, e);
                continue;
            }
        };

        match parse_manifest(&text) {
            Some(manifest) => {
                debug!("Found app {} in {:?}", manifest.appid, file);
                apps.push(DiscoveredApp {
                    manifest,
                    library_folder: folder.to_path_buf(),
                });
            }
            None => debug!("Skipping manifest without app id: {:?}", file),
        }
    }

    apps
}

/// Apps discovered across all library folders of one run.
///
/// Keyed by app id. A later sighting of the same id replaces the earlier record
/// but keeps its position, so iteration order is the order ids were first seen.
#[derive(Debug, Default, Clone)]
pub struct ScanResult {
    apps: Vec<DiscoveredApp>,
    index: HashMap<u64, usize>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan `folders` in order and merge the results
    pub fn scan_folders<'a, I>(folders: I) -> Self
    where
        I: IntoIterator<Item = &'a PathBuf>,
    {
        let mut result = Self::new();
        for folder in folders {
            let found = scan_library_folder(folder);
            info!("Scanned {:?}: {} manifests", folder, found.len());
            result.extend(found);
        }
        result
    }

    pub fn insert(&mut self, app: DiscoveredApp) {
        match self.index.get(&app.appid()) {
            Some(&slot) => {
                debug!(
                    "App {} seen again in {:?}, replacing record from {:?}",
                    app.appid(),
                    app.library_folder,
                    self.apps[slot].library_folder
                );
                self.apps[slot] = app;
            }
            None => {
                self.index.insert(app.appid(), self.apps.len());
                self.apps.push(app);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &DiscoveredApp> {
        self.apps.iter()
    }

    pub fn len(&self) -> usize {
        self.apps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apps.is_empty()
    }
}

impl Extend<DiscoveredApp> for ScanResult {
    fn extend<T: IntoIterator<Item = DiscoveredApp>>(&mut self, iter: T) {
        for app in iter {
            self.insert(app);
        }
    }
}
