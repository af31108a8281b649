//! Loading and saving the Sunshine `apps.json` catalog

use super::entry::APPS_KEY;
use crate::io::paths::backup_path;
use crate::{Result, SyncError};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// The catalog document: the entry list plus every other top-level key, untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Catalog {
    #[serde(flatten)]
    extra: Map<String, Value>,
    apps: Vec<Value>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize any parsed JSON into a catalog.
    ///
    /// An object keeps its keys and gets an empty `apps` list if it has none (a
    /// non-list `apps` value is replaced); a bare list becomes the `apps` list;
    /// anything else is an empty catalog.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(mut extra) => {
                let apps = match extra.remove(APPS_KEY) {
                    Some(Value::Array(apps)) => apps,
                    Some(other) => {
                        warn!("Catalog '{}' is not a list ({}), starting a new one", APPS_KEY, other);
                        Vec::new()
                    }
                    None => Vec::new(),
                };
                Self { extra, apps }
            }
            Value::Array(apps) => Self {
                extra: Map::new(),
                apps,
            },
            other => {
                debug!("Ignoring catalog content that is neither object nor list: {}", other);
                Self::new()
            }
        }
    }

    /// Parse catalog text; invalid JSON yields an empty catalog
    pub fn parse(text: &str) -> Self {
        match serde_json::from_str::<Value>(text) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                debug!("Catalog is not valid JSON, starting empty: {}", e);
                Self::new()
            }
        }
    }

    /// Load the catalog at `path`. A missing or unreadable file is a cold start,
    /// not an error.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) => {
                debug!("No readable catalog at {:?}, starting empty: {}", path, e);
                Self::new()
            }
        }
    }

    pub fn apps(&self) -> &[Value] {
        &self.apps
    }

    pub(crate) fn apps_mut(&mut self) -> &mut Vec<Value> {
        &mut self.apps
    }

    /// Top-level keys other than the entry list
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Indented JSON with a trailing newline
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        Ok(content)
    }

    /// Write the catalog to `path`, replacing it.
    ///
    /// With `backup`, an existing file is first copied verbatim to `<path>.bak`.
    /// The new content goes to a temporary file in the same directory which is
    /// then renamed over `path`. Returns the backup path when one was written.
    pub fn save(&self, path: &Path, backup: bool) -> Result<Option<PathBuf>> {
        let content = self.to_json_pretty()?;

        let backup_file = if backup && path.exists() {
            let bak = backup_path(path);
            fs::copy(path, &bak).map_err(|e| SyncError::persist(&bak, e))?;
            debug!("Backed up {:?} to {:?}", path, bak);
            Some(bak)
        } else {
            None
        };

        let parent = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(|e| SyncError::persist(parent, e))?;

        let mut staged = NamedTempFile::new_in(parent).map_err(|e| SyncError::persist(parent, e))?;
        staged
            .write_all(content.as_bytes())
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|e| SyncError::persist(staged.path(), e))?;

        // Keep the catalog's permissions rather than the temp file's 0600
        if let Ok(metadata) = fs::metadata(path) {
            staged
                .as_file()
                .set_permissions(metadata.permissions())
                .map_err(|e| SyncError::persist(staged.path(), e))?;
        }

        staged
            .persist(path)
            .map_err(|e| SyncError::persist(path, e.error))?;

        Ok(backup_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_object_with_apps_used_as_is() {
        let catalog = Catalog::from_value(json!({
            "env": {"PATH": "$(PATH):/usr/games"},
            "apps": [{"name": "Desktop", "image-path": "desktop.png"}]
        }));
        assert_eq!(catalog.apps().len(), 1);
        assert_eq!(catalog.extra()["env"], json!({"PATH": "$(PATH):/usr/games"}));
    }

    #[test]
    fn test_object_without_apps_gets_empty_list() {
        let catalog = Catalog::from_value(json!({"env": {}, "version": 2}));
        assert!(catalog.apps().is_empty());
        assert_eq!(
            catalog.to_value().unwrap(),
            json!({"env": {}, "version": 2, "apps": []})
        );
    }

    #[test]
    fn test_bare_list_wrapped() {
        let catalog = Catalog::from_value(json!([{"name": "Desktop"}]));
        assert_eq!(catalog.to_value().unwrap(), json!({"apps": [{"name": "Desktop"}]}));
    }

    #[test]
    fn test_garbage_is_empty_catalog() {
        assert_eq!(Catalog::parse("{ not json"), Catalog::new());
        assert_eq!(Catalog::parse("42"), Catalog::new());
        assert_eq!(Catalog::parse(""), Catalog::new());

        let dir = TempDir::new().unwrap();
        assert_eq!(Catalog::load(&dir.path().join("missing.json")), Catalog::new());
    }

    #[test]
    fn test_non_list_apps_replaced() {
        let catalog = Catalog::from_value(json!({"apps": "oops", "env": {}}));
        assert!(catalog.apps().is_empty());
        assert_eq!(catalog.extra().len(), 1);
    }

    #[test]
    fn test_key_order_preserved() {
        let catalog = Catalog::parse(r#"{"zeta": 1, "alpha": 2, "apps": []}"#);
        let content = catalog.to_json_pretty().unwrap();
        let zeta = content.find("zeta").unwrap();
        let alpha = content.find("alpha").unwrap();
        assert!(zeta < alpha);
        assert!(content.ends_with("}\n"));
    }

    #[test]
    fn test_save_with_backup_copies_previous_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apps.json");
        let original = "{\"apps\":[],   \"env\":{}}";
        fs::write(&path, original).unwrap();

        let catalog = Catalog::load(&path);
        let backup = catalog.save(&path, true).unwrap();

        assert_eq!(backup, Some(dir.path().join("apps.json.bak")));
        assert_eq!(fs::read_to_string(dir.path().join("apps.json.bak")).unwrap(), original);
        let reloaded: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(reloaded, json!({"env": {}, "apps": []}));
    }

    #[test]
    fn test_save_overwrites_stale_backup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apps.json");
        let bak = dir.path().join("apps.json.bak");
        let previous = "{\"apps\": [{\"name\": \"Desktop\"}]}\n";
        fs::write(&path, previous).unwrap();
        fs::write(&bak, "{\"apps\": [\"stale backup from an older run\"]}").unwrap();

        let backup = Catalog::load(&path).save(&path, true).unwrap();

        assert_eq!(backup, Some(bak.clone()));
        assert_eq!(fs::read(&bak).unwrap(), previous.as_bytes());
    }

    #[test]
    fn test_save_without_backup_or_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("apps.json");

        let backup = Catalog::new().save(&path, true).unwrap();
        assert_eq!(backup, None);
        assert!(path.exists());
        assert!(!dir.path().join("nested").join("apps.json.bak").exists());

        let backup = Catalog::new().save(&path, false).unwrap();
        assert_eq!(backup, None);
        assert!(!dir.path().join("nested").join("apps.json.bak").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apps.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        Catalog::new().save(&path, false).unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }
}
