use crate::steam::DiscoveredApp;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level key holding the entry list
pub const APPS_KEY: &str = "apps";

/// Entry key carrying the Steam app id; the only key used for identity
pub const APPID_KEY: &str = "steam-appid";

/// Entry key for the cover image, backfilled on every entry before a write
pub const IMAGE_PATH_KEY: &str = "image-path";

/// Category label given to every entry this tool adds
pub const STEAM_CATEGORY: &str = "Steam";

/// Command Sunshine runs detached to start a game through the Steam client
pub fn launch_command(appid: u64) -> String {
    format!("steam steam://rungameid/{}", appid)
}

/// A catalog entry created for a newly discovered game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AppEntry {
    pub name: String,
    pub steam_appid: u64,
    pub detached: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    pub category: String,
    pub image_path: String,
    pub auto_detach: String,
    pub wait_all: String,
    pub exit_timeout: String,
    pub elevated: String,
}

impl AppEntry {
    /// Entry for `appid` with the fixed presentation defaults
    pub fn new(appid: u64, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steam_appid: appid,
            detached: vec![launch_command(appid)],
            working_dir: None,
            category: STEAM_CATEGORY.to_string(),
            image_path: String::new(),
            auto_detach: "true".to_string(),
            wait_all: "true".to_string(),
            exit_timeout: "5".to_string(),
            elevated: "false".to_string(),
        }
    }

    /// Build an entry from a scanned manifest. The working directory is only set
    /// when the install directory exists right now.
    pub fn from_discovered(app: &DiscoveredApp) -> Self {
        let mut entry = Self::new(app.appid(), app.manifest.display_name());
        entry.working_dir = app
            .install_path()
            .map(|path| path.to_string_lossy().into_owned());
        entry
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}
