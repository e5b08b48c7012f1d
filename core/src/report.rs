use std::fs;
use std::io;
use std::path::PathBuf;

use selector::Report;

/// Keeps the strategy behind the latest move in a file, for tooling that
/// watches the bot from outside.
pub struct ReportFile {
    path: PathBuf,
}

impl ReportFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Replaces the file contents with the report's strategy name.
    pub fn record(&self, report: &Report) -> io::Result<()> {
        fs::write(&self.path, format!("{}\n", report.strategy))
    }
}
