use crate::{Result, SyncError};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::path::{Component, Path, PathBuf};

/// File name of the Sunshine application catalog
pub const CATALOG_FILE_NAME: &str = "apps.json";

/// File name of the status log, placed next to the catalog
pub const LOG_FILE_NAME: &str = "steam-catalog-sync.log";

static ENV_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))").unwrap());

/// Path management for the catalog and its companion files
#[derive(Debug, Clone)]
pub struct CatalogPaths {
    /// The catalog file itself
    pub catalog_file: PathBuf,
}

impl CatalogPaths {
    /// Locate the catalog in Sunshine's standard configuration directory
    pub fn new() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "sunshine").ok_or_else(|| {
            SyncError::Path("Failed to determine Sunshine config directory".to_string())
        })?;

        Ok(Self {
            catalog_file: dirs.config_dir().join(CATALOG_FILE_NAME),
        })
    }

    /// Use an explicit catalog file
    pub fn for_catalog(catalog_file: impl Into<PathBuf>) -> Self {
        Self {
            catalog_file: catalog_file.into(),
        }
    }

    /// Status log colocated with the catalog
    pub fn log_file(&self) -> PathBuf {
        self.catalog_file
            .parent()
            .map(|dir| dir.join(LOG_FILE_NAME))
            .unwrap_or_else(|| PathBuf::from(LOG_FILE_NAME))
    }
}

/// Append `.bak` to the full file name (`apps.json` -> `apps.json.bak`)
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// The invoking user's home directory
pub fn home_dir() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Expand a leading `~` and `$VAR` / `${VAR}` references using the process environment
pub fn expand_path(raw: &str) -> PathBuf {
    expand_path_with(raw, home_dir().as_deref(), |name| std::env::var(name).ok())
}

/// Expansion with an explicit home directory and variable lookup.
/// Unknown variables are left as written.
pub fn expand_path_with<F>(raw: &str, home: Option<&Path>, lookup: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    let expanded = ENV_VAR.replace_all(raw, |caps: &Captures| {
        let name = caps.get(1).or_else(|| caps.get(2)).map_or("", |m| m.as_str());
        lookup(name).unwrap_or_else(|| caps[0].to_string())
    });

    match (home, expanded.strip_prefix('~')) {
        (Some(home), Some(rest)) if rest.is_empty() => home.to_path_buf(),
        (Some(home), Some(rest)) if rest.starts_with('/') => {
            home.join(rest.trim_start_matches('/'))
        }
        _ => PathBuf::from(&*expanded),
    }
}

/// Make a path absolute against the current directory and fold away `.` and `..`
/// without touching the filesystem
pub fn normalize_absolute(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("/"))
            .join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn vars(name: &str) -> Option<String> {
        match name {
            "XDG_DATA_HOME" => Some("/data".to_string()),
            "DRIVE" => Some("games".to_string()),
            _ => None,
        }
    }

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/cfg/sunshine/apps.json")),
            PathBuf::from("/cfg/sunshine/apps.json.bak")
        );
    }

    #[test]
    fn test_log_file_next_to_catalog() {
        let paths = CatalogPaths::for_catalog("/cfg/sunshine/apps.json");
        assert_eq!(
            paths.log_file(),
            PathBuf::from("/cfg/sunshine/steam-catalog-sync.log")
        );
    }

    #[test]
    fn test_default_catalog_location() {
        if let Ok(paths) = CatalogPaths::new() {
            assert!(paths.catalog_file.ends_with("apps.json"));
        }
    }

    #[test]
    fn test_expand_home_and_variables() {
        let home = Path::new("/home/deck");
        assert_eq!(
            expand_path_with("~/Games", Some(home), vars),
            PathBuf::from("/home/deck/Games")
        );
        assert_eq!(expand_path_with("~", Some(home), vars), PathBuf::from("/home/deck"));
        assert_eq!(
            expand_path_with("${XDG_DATA_HOME}/Steam", Some(home), vars),
            PathBuf::from("/data/Steam")
        );
        assert_eq!(
            expand_path_with("/mnt/$DRIVE/SteamLibrary", Some(home), vars),
            PathBuf::from("/mnt/games/SteamLibrary")
        );
    }

    #[test]
    fn test_unknown_variable_left_alone() {
        assert_eq!(
            expand_path_with("/mnt/$NOPE/lib", None, vars),
            PathBuf::from("/mnt/$NOPE/lib")
        );
        // ~user forms are not expanded
        assert_eq!(
            expand_path_with("~other/lib", Some(Path::new("/home/deck")), vars),
            PathBuf::from("~other/lib")
        );
    }

    #[test]
    fn test_normalize_absolute() {
        assert_eq!(
            normalize_absolute(Path::new("/mnt/./games/../SteamLibrary/")),
            PathBuf::from("/mnt/SteamLibrary")
        );
        assert!(normalize_absolute(Path::new("relative/lib")).is_absolute());
    }
}
