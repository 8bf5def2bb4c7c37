//! JSON-lines persistence for the session history ledger.

use std::{
    fs::{self, OpenOptions},
    io::{self, BufRead, BufReader, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use cleaning_robot_system_history::{History, RunSummary, SessionRecord};
use tracing::debug;

/// File-backed history where each line holds one JSON-encoded record.
#[derive(Clone, Debug)]
pub(crate) struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    /// Creates a store rooted at `path`; the file is created on first append.
    pub(crate) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads every stored record. A missing file is an empty history.
    pub(crate) fn load(&self) -> Result<History> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(History::new()),
            Err(error) => {
                return Err(error).with_context(|| {
                    format!("failed to open history at {}", self.path.display())
                })
            }
        };

        let mut records = Vec::new();
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line
                .with_context(|| format!("failed to read history at {}", self.path.display()))?;
            if line.trim().is_empty() {
                continue;
            }
            let record: SessionRecord = serde_json::from_str(&line).with_context(|| {
                format!(
                    "malformed history record on line {} of {}",
                    index + 1,
                    self.path.display()
                )
            })?;
            records.push(record);
        }

        Ok(History::from_records(records))
    }

    /// Records `summary` with the next identifier and appends it to the file.
    pub(crate) fn append(&self, summary: RunSummary) -> Result<SessionRecord> {
        let mut history = self.load()?;
        let record = history.record(summary).clone();

        ensure_parent(&self.path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open history at {}", self.path.display()))?;
        let line = serde_json::to_string(&record).context("failed to encode history record")?;
        writeln!(file, "{line}")
            .with_context(|| format!("failed to append to history at {}", self.path.display()))?;

        debug!(id = record.id, path = %self.path.display(), "stored session record");
        Ok(record)
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
            .with_context(|| format!("failed to create directory {}", parent.display())),
        _ => Ok(()),
    }
}
