use std::path::{Path, PathBuf};
use tracing::debug;

/// Well-known Steam data directories, relative to the user's home directory.
/// Native installs first, then Flatpak and Snap.
pub const CANDIDATE_ROOTS: &[&str] = &[
    ".steam/steam",
    ".local/share/Steam",
    ".steam/root",
    ".var/app/com.valvesoftware.Steam/.local/share/Steam",
    ".var/app/com.valvesoftware.Steam/.steam/steam",
    "snap/steam/common/.local/share/Steam",
];

/// Find the Steam library roots that exist on this machine.
///
/// An explicit `override_root` replaces the whole candidate list. Finding
/// nothing yields an empty list, which callers treat as "nothing to do".
pub fn find_library_roots(override_root: Option<&Path>, home: Option<&Path>) -> Vec<PathBuf> {
    let candidates: Vec<PathBuf> = match (override_root, home) {
        (Some(root), _) => vec![root.to_path_buf()],
        (None, Some(home)) => CANDIDATE_ROOTS.iter().map(|rel| home.join(rel)).collect(),
        (None, None) => Vec::new(),
    };

    candidates
        .into_iter()
        .filter(|candidate| {
            let exists = candidate.is_dir();
            debug!("Steam root candidate {:?} exists: {}", candidate, exists);
            exists
        })
        .collect()
}
