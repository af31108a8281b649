//! Steam library discovery: roots, library folders and app manifests

pub mod keyvalues;
pub mod library;
pub mod locator;
pub mod manifest;

pub use library::resolve_library_folders;
pub use locator::find_library_roots;
pub use manifest::{parse_manifest, AppManifest, DiscoveredApp, ScanResult};
