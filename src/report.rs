//! Score report: one CSV row per sweep combination.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Outcome of one (k_neighbors, k_features) combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub k_neighbors: usize,
    pub k_features: usize,
    /// Classification accuracy on the test partition, in `[0, 1]`.
    pub score: f64,
    /// Wall time for selection, alignment, projection, fit and score, in seconds.
    pub time: f64,
}

/// Column names of the score report, in order.
pub const REPORT_HEADER: [&str; 4] = ["k_neighbors", "k_features", "score", "time"];

/// Appends [`ScoreRecord`]s to a CSV sink, flushing after every row.
pub struct ScoreWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl ScoreWriter<File> {
    /// Create (or truncate) the report file at `path`.
    pub fn create(path: &Path) -> Result<Self, csv::Error> {
        Self::new(File::create(path)?)
    }
}

impl<W: Write> ScoreWriter<W> {
    /// Writes and flushes the header row immediately.
    pub fn new(sink: W) -> Result<Self, csv::Error> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        writer.write_record(REPORT_HEADER)?;
        writer.flush()?;
        Ok(Self { writer })
    }

    pub fn append(&mut self, record: &ScoreRecord) -> Result<(), csv::Error> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W, csv::Error> {
        self.writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))
    }
}

/// Highest-scoring record; the earliest one wins a tie.
pub fn best_record(records: &[ScoreRecord]) -> Option<&ScoreRecord> {
    records.iter().fold(None, |best: Option<&ScoreRecord>, r| match best {
        Some(b) if b.score >= r.score => Some(b),
        _ => Some(r),
    })
}
