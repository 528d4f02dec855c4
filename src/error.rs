use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Table parsing
// ---------------------------------------------------------------------------

/// Errors raised while turning a delimited table into a [`FeatureTable`].
///
/// Row numbers are 0-based positions in the file, so row 0 is the header.
///
/// [`FeatureTable`]: crate::data::model::FeatureTable
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedExtension(String),

    #[error("Row {row}: label '{label}' has {len} characters, need more than {offset}")]
    ShortLabel {
        row: usize,
        label: String,
        len: usize,
        offset: usize,
    },

    #[error("Row {row}, column {column}: '{value}' is not a number")]
    NotNumeric {
        row: usize,
        column: usize,
        value: String,
    },

    #[error("Row {row}: expected {expected} columns, found {found}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// Row / column bookkeeping
// ---------------------------------------------------------------------------

/// Broken preconditions between the data matrix, its labels and its feature names.
#[derive(Error, Debug, PartialEq)]
pub enum AlignmentError {
    #[error("{rows} data rows but {labels} labels")]
    LengthMismatch { rows: usize, labels: usize },

    #[error("{columns} data columns but {features} feature names")]
    FeatureCountMismatch { columns: usize, features: usize },

    #[error("Cannot probe columns: reduced data has no rows")]
    EmptyProbe,

    #[error("Reduced columns are not a subsequence of the original columns (matched {matched} of {expected})")]
    NotASubsequence { matched: usize, expected: usize },

    #[error("Selected feature '{name}' not found in order among the original features")]
    UnknownFeature { name: String },
}

// ---------------------------------------------------------------------------
// Selector / classifier
// ---------------------------------------------------------------------------

#[derive(Error, Debug, PartialEq)]
pub enum EstimatorError {
    #[error("Requested {requested} features but only {available} are available")]
    TooManyFeatures { requested: usize, available: usize },

    #[error("At least one feature must be selected")]
    ZeroFeatures,

    #[error("Neighbor count must be at least 1")]
    ZeroNeighbors,

    #[error("Requested {requested} neighbors but only {available} training rows")]
    TooManyNeighbors { requested: usize, available: usize },

    #[error("Training set is empty")]
    EmptyTraining,

    #[error("Classifier has not been fitted")]
    NotFitted,

    #[error("Dimension mismatch: expected {expected}, got {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SweepError {
    #[error(transparent)]
    Alignment(#[from] AlignmentError),

    #[error(transparent)]
    Estimator(#[from] EstimatorError),

    #[error("Report error: {0}")]
    Report(#[from] csv::Error),

    #[error("Test partition is empty; no combination can be scored")]
    EmptyTestPartition,
}
