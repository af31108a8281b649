//! Shared fixtures: fake Steam roots with library folders and manifests

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub fn manifest(appid: u64, name: &str, installdir: &str) -> String {
    format!(
        "\"AppState\"\n{{\n\t\"appid\"\t\t\"{appid}\"\n\t\"Universe\"\t\t\"1\"\n\t\"name\"\t\t\"{name}\"\n\t\"StateFlags\"\t\t\"4\"\n\t\"installdir\"\t\t\"{installdir}\"\n}}\n"
    )
}

/// A Steam root under `dir` with an empty `steamapps` folder
pub fn steam_root(dir: &Path) -> PathBuf {
    let root = dir.join("Steam");
    fs::create_dir_all(root.join("steamapps")).unwrap();
    root
}

/// Write `appmanifest_<appid>.acf` into a `steamapps` folder
pub fn add_manifest(steamapps: &Path, appid: u64, content: &str) {
    fs::create_dir_all(steamapps).unwrap();
    fs::write(steamapps.join(format!("appmanifest_{appid}.acf")), content).unwrap();
}

/// Add a game with its install directory present under `common/`
pub fn install_game(steamapps: &Path, appid: u64, name: &str, installdir: &str) {
    add_manifest(steamapps, appid, &manifest(appid, name, installdir));
    fs::create_dir_all(steamapps.join("common").join(installdir)).unwrap();
}

/// Point the root's `libraryfolders.vdf` at extra library directories
pub fn write_library_index(root: &Path, libraries: &[&Path]) {
    let mut vdf = String::from("\"libraryfolders\"\n{\n");
    for (i, library) in libraries.iter().enumerate() {
        vdf.push_str(&format!(
            "\t\"{i}\"\n\t{{\n\t\t\"path\"\t\t\"{}\"\n\t\t\"label\"\t\t\"\"\n\t}}\n",
            library.display()
        ));
    }
    vdf.push_str("}\n");
    fs::create_dir_all(root.join("steamapps")).unwrap();
    fs::write(root.join("steamapps").join("libraryfolders.vdf"), vdf).unwrap();
}
