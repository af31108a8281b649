pub mod paths;
pub mod status;

pub use paths::CatalogPaths;
pub use status::StatusLog;
