//! Merging discovered games into the catalog
//!
//! The merge is append-only. Existing entries keep their content and order; the
//! only change made to them is adding an empty `image-path` where it is missing.
//! Identity is the `steam-appid` field alone, never the name.

use super::entry::{AppEntry, APPID_KEY, IMAGE_PATH_KEY};
use super::store::Catalog;
use crate::steam::ScanResult;
use crate::Result;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Steam app id stored on a catalog entry, as an integer or a digit string
pub fn entry_appid(entry: &Value) -> Option<u64> {
    match entry.get(APPID_KEY)? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Map of app id to entry position. Entries without an id are ignored; for
/// repeated ids the first entry is kept.
pub fn existing_app_ids(apps: &[Value]) -> HashMap<u64, usize> {
    let mut ids = HashMap::new();
    for (position, entry) in apps.iter().enumerate() {
        if let Some(appid) = entry_appid(entry) {
            ids.entry(appid).or_insert(position);
        }
    }
    ids
}

/// Entries to append, in discovery order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergePlan {
    pub new_entries: Vec<AppEntry>,
}

impl MergePlan {
    pub fn is_empty(&self) -> bool {
        self.new_entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.new_entries.len()
    }
}

/// Work out which discovered games are not in the catalog yet
pub fn plan_merge(catalog: &Catalog, scan: &ScanResult) -> MergePlan {
    let existing = existing_app_ids(catalog.apps());

    let new_entries = scan
        .iter()
        .filter(|app| {
            let known = existing.contains_key(&app.appid());
            if known {
                debug!("App {} already in catalog", app.appid());
            }
            !known
        })
        .map(AppEntry::from_discovered)
        .collect();

    MergePlan { new_entries }
}

/// Ensure every entry object has an `image-path` field
pub fn backfill_image_paths(apps: &mut [Value]) {
    for entry in apps.iter_mut() {
        if let Value::Object(fields) = entry {
            fields
                .entry(IMAGE_PATH_KEY)
                .or_insert_with(|| Value::String(String::new()));
        }
    }
}

/// Append the planned entries to the catalog and backfill image paths
pub fn apply_merge(catalog: &mut Catalog, plan: &MergePlan) -> Result<()> {
    let apps = catalog.apps_mut();
    for entry in &plan.new_entries {
        apps.push(entry.to_value()?);
    }
    backfill_image_paths(apps);
    Ok(())
}
