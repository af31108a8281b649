//! Adds installed Steam games to a Sunshine `apps.json` catalog.
//!
//! A run locates Steam roots, expands them into library folders, reads every
//! app manifest and appends the games the catalog does not list yet.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod steam;

pub use error::{Result, SyncError};
