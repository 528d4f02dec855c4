use log::{debug, warn};
use ndarray::{ArrayView2, Axis};

use super::model::{FeatureTable, Partition, Split};
use crate::error::AlignmentError;

/// Default number of leading rows of each label run kept for training.
pub const DEFAULT_TRAINING_RUN_LENGTH: usize = 3;

/// Mark each row as training (`true`) or testing (`false`).
///
/// Rows are scanned in order. A row whose label differs from the previous
/// row's label starts a new run; the first `run_length` rows of every run go
/// to training and the rest of the run goes to testing.
pub fn training_mask(labels: &[char], run_length: usize) -> Vec<bool> {
    let mut mask = Vec::with_capacity(labels.len());
    let mut current: Option<char> = None;
    let mut count = 0usize;
    let mut training_only_runs = 0usize;

    for &label in labels {
        if current == Some(label) {
            count += 1;
            mask.push(count <= run_length);
        } else {
            if count > 0 && count <= run_length {
                training_only_runs += 1;
            }
            current = Some(label);
            count = 1;
            mask.push(true);
        }
    }
    if count > 0 && count <= run_length {
        training_only_runs += 1;
    }

    if training_only_runs > 0 {
        warn!("{training_only_runs} label run(s) of at most {run_length} rows have no test rows");
    }
    mask
}

/// Partition `data`/`labels` into training and testing sets.
///
/// Row order inside each partition follows the original order.
pub fn split_dataset(
    data: ArrayView2<'_, f64>,
    labels: &[char],
    run_length: usize,
) -> Result<Split, AlignmentError> {
    if data.nrows() != labels.len() {
        return Err(AlignmentError::LengthMismatch {
            rows: data.nrows(),
            labels: labels.len(),
        });
    }

    let mask = training_mask(labels, run_length);
    let (train_idx, test_idx): (Vec<usize>, Vec<usize>) =
        (0..labels.len()).partition(|&i| mask[i]);

    debug!(
        "Split {} rows into {} training / {} testing",
        labels.len(),
        train_idx.len(),
        test_idx.len()
    );

    Ok(Split {
        training: take_rows(data, labels, &train_idx),
        testing: take_rows(data, labels, &test_idx),
    })
}

/// Split a parsed table.
pub fn split_table(table: &FeatureTable, run_length: usize) -> Result<Split, AlignmentError> {
    split_dataset(table.data.view(), &table.labels, run_length)
}

fn take_rows(data: ArrayView2<'_, f64>, labels: &[char], indices: &[usize]) -> Partition {
    Partition {
        data: data.select(Axis(0), indices),
        labels: indices.iter().map(|&i| labels[i]).collect(),
    }
}
