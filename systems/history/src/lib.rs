#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session history ledger and CSV export for completed simulation runs.
//!
//! The ledger is storage agnostic: adapters decide where records live and
//! hand them back through [`History::from_records`] when exporting.

use std::{io, time::Duration};

use chrono::{DateTime, Utc};
use cleaning_robot_core::{ModelKind, RunStatus};
use serde::{Deserialize, Serialize};

/// Header row emitted before every CSV export.
pub const CSV_HEADER: &str =
    "id,model_type,start_time,final_state,num_actions,num_cleaned_tiles,duration";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Measurements captured by the caller around one execution run.
#[derive(Clone, Debug, PartialEq)]
pub struct RunSummary {
    /// Robot model used for the run.
    pub model: ModelKind,
    /// Wall-clock instant the run started.
    pub start_time: DateTime<Utc>,
    /// Terminal status reported by the engine.
    pub final_state: RunStatus,
    /// Total unit steps requested by the command list.
    pub num_actions: u64,
    /// Number of distinct tiles cleaned.
    pub num_cleaned_tiles: u64,
    /// Wall-clock time spent executing.
    pub duration: Duration,
}

/// Persisted record describing a single run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Sequential identifier, starting at one.
    pub id: u64,
    /// Robot model used for the run.
    pub model_type: ModelKind,
    /// Wall-clock instant the run started.
    pub start_time: DateTime<Utc>,
    /// Terminal status reported by the engine.
    pub final_state: RunStatus,
    /// Total unit steps requested by the command list.
    pub num_actions: u64,
    /// Number of distinct tiles cleaned.
    pub num_cleaned_tiles: u64,
    /// Wall-clock execution time in seconds.
    pub duration: f64,
}

impl SessionRecord {
    /// Formats the record as a CSV row without a trailing newline.
    #[must_use]
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{},{}",
            self.id,
            self.model_type,
            self.start_time.format(TIMESTAMP_FORMAT),
            self.final_state,
            self.num_actions,
            self.num_cleaned_tiles,
            self.duration
        )
    }
}

/// Ordered ledger of session records.
#[derive(Clone, Debug, Default)]
pub struct History {
    records: Vec<SessionRecord>,
    next_id: u64,
}

impl History {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a ledger from previously persisted records.
    ///
    /// Records are ordered by id; new records continue after the highest id.
    #[must_use]
    pub fn from_records(mut records: Vec<SessionRecord>) -> Self {
        records.sort_by_key(|record| record.id);
        let next_id = records.last().map_or(0, |record| record.id);
        Self { records, next_id }
    }

    /// Appends a record for `summary`, assigning the next identifier.
    pub fn record(&mut self, summary: RunSummary) -> &SessionRecord {
        self.next_id = self.next_id.saturating_add(1);
        self.records.push(SessionRecord {
            id: self.next_id,
            model_type: summary.model,
            start_time: summary.start_time,
            final_state: summary.final_state,
            num_actions: summary.num_actions,
            num_cleaned_tiles: summary.num_cleaned_tiles,
            duration: summary.duration.as_secs_f64(),
        });
        &self.records[self.records.len() - 1]
    }

    /// Records in ascending id order.
    #[must_use]
    pub fn records(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Reports whether the ledger holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the header and one row per record to `out`.
    pub fn export_csv<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "{CSV_HEADER}")?;
        for record in &self.records {
            writeln!(out, "{}", record.to_csv_row())?;
        }
        out.flush()
    }
}
