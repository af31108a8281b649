//! Status reporting for sync runs
//!
//! Every user-facing status line goes through a [`StatusLog`], which fans it out
//! to a set of [`StatusSink`]s and keeps a copy for the run report. File sinks are
//! best effort: a failed append never affects the outcome of a run.

use crate::Result;
use chrono::{SecondsFormat, Utc};
use std::cell::RefCell;
use std::fs::{create_dir_all, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;

/// Destination for status lines
pub trait StatusSink {
    /// Write a single status line
    fn write(&self, message: &str) -> Result<()>;
}

/// Stdout sink - prints each line as-is
pub struct ConsoleSink;

impl StatusSink for ConsoleSink {
    fn write(&self, message: &str) -> Result<()> {
        println!("{}", message);
        Ok(())
    }
}

/// Append-only log file sink
///
/// Lines are written as `<UTC timestamp> - <message>`.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn format_line(message: &str) -> String {
        format!(
            "{} - {}\n",
            Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            message
        )
    }
}

impl StatusSink for FileSink {
    fn write(&self, message: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.write_all(Self::format_line(message).as_bytes())?;
        file.flush()?;

        Ok(())
    }
}

/// Collects status lines for one run
#[derive(Default)]
pub struct StatusLog {
    sinks: Vec<Box<dyn StatusSink>>,
    history: RefCell<Vec<String>>,
}

impl StatusLog {
    /// A log that only records messages in memory
    pub fn silent() -> Self {
        Self::default()
    }

    /// Console output, plus an optional log file
    pub fn console(log_file: Option<PathBuf>) -> Self {
        let mut log = Self::silent().with_sink(ConsoleSink);
        if let Some(path) = log_file {
            log = log.with_sink(FileSink::new(path));
        }
        log
    }

    pub fn with_sink(mut self, sink: impl StatusSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Record a status line and forward it to every sink
    pub fn emit(&self, message: impl Into<String>) {
        let message = message.into();
        for sink in &self.sinks {
            if let Err(e) = sink.write(&message) {
                debug!("Dropping status line, sink failed: {}", e);
            }
        }
        self.history.borrow_mut().push(message);
    }

    /// Every line emitted so far
    pub fn messages(&self) -> Vec<String> {
        self.history.borrow().clone()
    }
}
