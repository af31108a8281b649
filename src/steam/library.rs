use super::keyvalues;
use crate::io::paths::{expand_path, normalize_absolute};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory under a library root that holds the app manifests
pub const STEAMAPPS_DIR: &str = "steamapps";

/// Library index, relative to a Steam root
pub const LIBRARY_INDEX: &str = "steamapps/libraryfolders.vdf";

/// Expand a Steam root into the `steamapps` folders it knows about.
///
/// Folders listed in `libraryfolders.vdf` come first, in file order, followed by
/// the root's own `steamapps` directory. A missing or unreadable index is not an
/// error; the root's own folder is always returned.
pub fn resolve_library_folders(root: &Path) -> Vec<PathBuf> {
    resolve_library_folders_with(root, expand_path)
}

pub(crate) fn resolve_library_folders_with<F>(root: &Path, expand: F) -> Vec<PathBuf>
where
    F: Fn(&str) -> PathBuf,
{
    let index = root.join(LIBRARY_INDEX);
    let listed = match fs::read_to_string(&index) {
        Ok(text) => keyvalues::library_paths(&text),
        Err(e) => {
            debug!("No readable library index at {:?}: {}", index, e);
            Vec::new()
        }
    };

    let candidates = listed
        .iter()
        .map(|raw| expand(raw).join(STEAMAPPS_DIR))
        .chain(std::iter::once(root.join(STEAMAPPS_DIR)));

    let mut folders = Vec::new();
    dedup_into(&mut folders, &mut HashSet::new(), candidates);
    folders
}

/// Append normalized paths not already in `seen`, first occurrence wins
pub(crate) fn dedup_into<I>(folders: &mut Vec<PathBuf>, seen: &mut HashSet<PathBuf>, paths: I)
where
    I: IntoIterator<Item = PathBuf>,
{
    for path in paths {
        let normalized = normalize_absolute(&path);
        if seen.insert(normalized.clone()) {
            folders.push(normalized);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::paths::expand_path_with;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write_index(root: &Path, content: &str) {
        let steamapps = root.join(STEAMAPPS_DIR);
        fs::create_dir_all(&steamapps).unwrap();
        fs::write(root.join(LIBRARY_INDEX), content).unwrap();
    }

    #[test]
    fn test_missing_index_uses_default_folder() {
        let root = TempDir::new().unwrap();
        let folders = resolve_library_folders(root.path());
        assert_eq!(folders, vec![root.path().join("steamapps")]);
    }

    #[test]
    fn test_index_paths_then_default() {
        let root = TempDir::new().unwrap();
        let index = format!(
            "\"libraryfolders\"\n{{\n\t\"0\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t}}\n\t\"1\"\n\t{{\n\t\t\"path\"\t\t\"/mnt/games/SteamLibrary\"\n\t}}\n}}\n",
            root.path().display()
        );
        write_index(root.path(), &index);

        let folders = resolve_library_folders(root.path());
        assert_eq!(
            folders,
            vec![
                root.path().join("steamapps"),
                PathBuf::from("/mnt/games/SteamLibrary/steamapps"),
            ]
        );
    }

    #[test]
    fn test_placeholders_expanded_and_duplicates_dropped() {
        let root = TempDir::new().unwrap();
        write_index(
            root.path(),
            "\"LibraryFolders\"\n{\n\t\"1\"\t\t\"~/Games\"\n\t\"2\"\t\t\"$LIBS/extra\"\n\t\"3\"\t\t\"/home/deck/./Games\"\n}\n",
        );

        let expand = |raw: &str| {
            expand_path_with(raw, Some(Path::new("/home/deck")), |name| {
                (name == "LIBS").then(|| "/srv/libs".to_string())
            })
        };
        let folders = resolve_library_folders_with(root.path(), expand);
        assert_eq!(
            folders,
            vec![
                PathBuf::from("/home/deck/Games/steamapps"),
                PathBuf::from("/srv/libs/extra/steamapps"),
                root.path().join("steamapps"),
            ]
        );
    }

    #[test]
    fn test_garbage_index_degrades_gracefully() {
        let root = TempDir::new().unwrap();
        write_index(root.path(), "\u{0}\u{1}not a vdf at all {{{");
        assert_eq!(
            resolve_library_folders(root.path()),
            vec![root.path().join("steamapps")]
        );
    }
}
