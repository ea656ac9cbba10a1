//! Per-run log artifact file.
//!
//! Each orchestrator run owns one append-only text file under the
//! configured log directory, named after the run's start time. The
//! control plane later serves it back to the caller as a download.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use codegen_core::types::format_timestamp;

/// Append-only log artifact for a single run.
pub struct RunLog {
    file_name: String,
    path: PathBuf,
    file: File,
}

impl RunLog {
    /// Create the artifact file under `dir`, named
    /// `code_gen_logs_{YYYYmmdd_HHMMSS}.txt`, and write the header block.
    ///
    /// Creates `dir` itself if it does not exist yet.
    pub fn create(dir: &Path, started_at: DateTime<Utc>) -> io::Result<Self> {
        fs::create_dir_all(dir)?;

        let file_name = format!("code_gen_logs_{}.txt", started_at.format("%Y%m%d_%H%M%S"));
        let path = dir.join(&file_name);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)?;

        writeln!(file, "Code Generation Logs - {}", format_timestamp(started_at))?;
        writeln!(file, "{}", "=".repeat(50))?;
        writeln!(file)?;

        Ok(Self {
            file_name,
            path,
            file,
        })
    }

    /// Append one line. Write failures are logged and swallowed; a
    /// broken artifact never aborts job processing.
    pub fn append(&mut self, line: &str) {
        if let Err(e) = writeln!(self.file, "{line}") {
            tracing::warn!(error = %e, path = %self.path.display(), "Failed to append to run log");
        }
    }

    /// File name of the artifact (relative to the log directory).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full path of the artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
