use log::{debug, warn};
use ndarray::{s, Array2, ArrayView2, Axis};

use crate::error::AlignmentError;

// ---------------------------------------------------------------------------
// Alignment: reduced columns → surviving feature names
// ---------------------------------------------------------------------------

/// Recover the names of the columns a feature selector kept.
///
/// `original` and `reduced` are probed on their shared leading rows, so both
/// views must start from the same source rows (pass the matrix the selector
/// was run on). Walking the original columns left to right, a column is
/// matched when it equals the next unmatched reduced column on every probe
/// row. Both cursors only move forward, so `reduced` must hold a subsequence
/// of the original columns in their original order.
///
/// Fails with [`AlignmentError::NotASubsequence`] when the scan ends before
/// every reduced column is matched. A reduced column that equals more than
/// one remaining original column is matched to the first and logged.
pub fn align_features(
    original: ArrayView2<'_, f64>,
    reduced: ArrayView2<'_, f64>,
    features: &[String],
) -> Result<Vec<String>, AlignmentError> {
    if original.ncols() != features.len() {
        return Err(AlignmentError::FeatureCountMismatch {
            columns: original.ncols(),
            features: features.len(),
        });
    }

    let expected = reduced.ncols();
    if expected == 0 {
        return Ok(Vec::new());
    }
    let depth = original.nrows().min(reduced.nrows());
    if depth == 0 {
        return Err(AlignmentError::EmptyProbe);
    }

    let probe = original.slice(s![..depth, ..]);
    let target = reduced.slice(s![..depth, ..]);

    let mut cursor = 0;
    let mut selected = Vec::with_capacity(expected);
    for (next, wanted) in target.axis_iter(Axis(1)).enumerate() {
        let found = (cursor..probe.ncols()).find(|&j| probe.column(j) == wanted);
        let Some(j) = found else {
            return Err(AlignmentError::NotASubsequence {
                matched: next,
                expected,
            });
        };

        if let Some(dup) = (j + 1..probe.ncols()).find(|&k| probe.column(k) == wanted) {
            warn!(
                "Selected column {next} matches both '{}' and '{}' on {depth} probe row(s); using '{}'",
                features[j], features[dup], features[j]
            );
        }

        selected.push(features[j].clone());
        cursor = j + 1;
    }

    debug!("Aligned {expected} selected features: {selected:?}");
    Ok(selected)
}

// ---------------------------------------------------------------------------
// Projection: keep only the selected columns
// ---------------------------------------------------------------------------

/// Column index of every selected name within `features`.
///
/// The search resumes just after the previous match, so `selected` must
/// list names in the same relative order as `features`.
pub fn column_indices(features: &[String], selected: &[String]) -> Result<Vec<usize>, AlignmentError> {
    let mut cursor = 0;
    let mut indices = Vec::with_capacity(selected.len());

    for name in selected {
        let pos = features[cursor..]
            .iter()
            .position(|f| f == name)
            .ok_or_else(|| AlignmentError::UnknownFeature { name: name.clone() })?;
        let idx = cursor + pos;
        indices.push(idx);
        cursor = idx + 1;
    }
    Ok(indices)
}

/// Reduce every row of `rows` to the `selected` columns, in `selected` order.
pub fn project_rows(
    rows: ArrayView2<'_, f64>,
    features: &[String],
    selected: &[String],
) -> Result<Array2<f64>, AlignmentError> {
    if rows.ncols() != features.len() {
        return Err(AlignmentError::FeatureCountMismatch {
            columns: rows.ncols(),
            features: features.len(),
        });
    }
    let indices = column_indices(features, selected)?;
    Ok(rows.select(Axis(1), &indices))
}
