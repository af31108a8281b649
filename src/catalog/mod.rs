//! The Sunshine application catalog

pub mod entry;
pub mod reconcile;
pub mod store;

pub use entry::AppEntry;
pub use reconcile::{apply_merge, plan_merge, MergePlan};
pub use store::Catalog;
