use ndarray::{Array2, ArrayView2};

use crate::error::AlignmentError;

// ---------------------------------------------------------------------------
// FeatureTable – the parsed input file
// ---------------------------------------------------------------------------

/// The full parsed table: an M×N data matrix, N feature names, M labels.
///
/// Never mutated after parsing; partitions and projections are copies.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    /// Numeric interior of the table, row-aligned with `labels`.
    pub data: Array2<f64>,
    /// Header cells after the label marker, in file order.
    pub features: Vec<String>,
    /// One canonical label character per data row.
    pub labels: Vec<char>,
}

impl FeatureTable {
    /// Assemble a table, checking that all three parts agree on shape.
    pub fn new(
        data: Array2<f64>,
        features: Vec<String>,
        labels: Vec<char>,
    ) -> Result<Self, AlignmentError> {
        if data.nrows() != labels.len() {
            return Err(AlignmentError::LengthMismatch {
                rows: data.nrows(),
                labels: labels.len(),
            });
        }
        if data.ncols() != features.len() {
            return Err(AlignmentError::FeatureCountMismatch {
                columns: data.ncols(),
                features: features.len(),
            });
        }
        Ok(Self {
            data,
            features,
            labels,
        })
    }

    /// Number of data rows (M).
    pub fn n_rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of feature columns (N).
    pub fn n_features(&self) -> usize {
        self.features.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Partition / Split
// ---------------------------------------------------------------------------

/// A row-aligned (data, labels) pair cut from a [`FeatureTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub data: Array2<f64>,
    pub labels: Vec<char>,
}

impl Partition {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn view(&self) -> ArrayView2<'_, f64> {
        self.data.view()
    }
}

/// Disjoint training/testing partitions that together cover every row once.
#[derive(Debug, Clone, PartialEq)]
pub struct Split {
    pub training: Partition,
    pub testing: Partition,
}
