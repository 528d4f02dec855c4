//! Univariate feature selection by one-way ANOVA F-statistic.

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};

use super::FeatureSelector;
use crate::error::EstimatorError;

/// Keeps the `k` columns with the highest ANOVA F-statistic.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnovaSelector;

impl AnovaSelector {
    pub fn new() -> Self {
        Self
    }

    /// Indices of the `k` best columns, ascending.
    ///
    /// NaN scores rank below every other score; equal scores
    /// prefer the lower column index.
    pub fn top_k_indices(
        &self,
        data: ArrayView2<'_, f64>,
        labels: &[char],
        k: usize,
    ) -> Result<Vec<usize>, EstimatorError> {
        if k == 0 {
            return Err(EstimatorError::ZeroFeatures);
        }
        if k > data.ncols() {
            return Err(EstimatorError::TooManyFeatures {
                requested: k,
                available: data.ncols(),
            });
        }
        if data.nrows() == 0 {
            return Err(EstimatorError::EmptyTraining);
        }
        if data.nrows() != labels.len() {
            return Err(EstimatorError::DimensionMismatch {
                expected: data.nrows(),
                found: labels.len(),
            });
        }

        let scores = f_classif(data, labels);
        let rank_key = |i: usize| {
            let s = scores[i];
            if s.is_nan() {
                f64::NEG_INFINITY
            } else {
                s
            }
        };

        let mut order: Vec<usize> = (0..scores.len()).collect();
        order.sort_by(|&a, &b| rank_key(b).total_cmp(&rank_key(a)).then(a.cmp(&b)));
        order.truncate(k);
        order.sort_unstable();
        Ok(order)
    }
}

impl FeatureSelector for AnovaSelector {
    fn select_top_k(
        &self,
        data: ArrayView2<'_, f64>,
        labels: &[char],
        k: usize,
    ) -> Result<Array2<f64>, EstimatorError> {
        let keep = self.top_k_indices(data, labels, k)?;
        Ok(data.select(Axis(1), &keep))
    }
}

/// One-way ANOVA F-statistic of every column against the class labels.
///
/// `F = (SSB / (G - 1)) / (SSW / (n - G))` for `G` classes over `n` rows.
/// Columns with no within-class spread score `+inf` when the class means
/// differ and NaN otherwise; a single class scores NaN everywhere.
pub fn f_classif(data: ArrayView2<'_, f64>, labels: &[char]) -> Vec<f64> {
    let mut groups: BTreeMap<char, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        groups.entry(label).or_default().push(i);
    }

    let n = labels.len() as f64;
    let n_groups = groups.len() as f64;
    let df_between = n_groups - 1.0;
    let df_within = n - n_groups;

    data.axis_iter(Axis(1))
        .map(|column| f_statistic(column, &groups, df_between, df_within))
        .collect()
}

fn f_statistic(
    column: ArrayView1<'_, f64>,
    groups: &BTreeMap<char, Vec<usize>>,
    df_between: f64,
    df_within: f64,
) -> f64 {
    if df_between <= 0.0 || df_within <= 0.0 {
        return f64::NAN;
    }

    let grand_mean = column.mean().unwrap_or(0.0);
    let mut ss_between = 0.0;
    let mut ss_within = 0.0;

    for rows in groups.values() {
        let size = rows.len() as f64;
        let mean = rows.iter().map(|&i| column[i]).sum::<f64>() / size;
        ss_between += size * (mean - grand_mean).powi(2);
        ss_within += rows.iter().map(|&i| (column[i] - mean).powi(2)).sum::<f64>();
    }

    (ss_between / df_between) / (ss_within / df_within)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn test_f_classif_known_value() {
        // Groups a: [1, 2, 3], b: [4, 5, 6]
        // grand mean 3.5, SSB = 3*1.5^2*2 = 13.5, SSW = 2 + 2 = 4
        // F = (13.5 / 1) / (4 / 4) = 13.5
        let data = array![[1.0], [2.0], [3.0], [4.0], [5.0], [6.0]];
        let labels = ['a', 'a', 'a', 'b', 'b', 'b'];
        let scores = f_classif(data.view(), &labels);
        assert_abs_diff_eq!(scores[0], 13.5, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_column_scores_nan() {
        let data = array![[1.0], [1.0], [1.0], [1.0]];
        let scores = f_classif(data.view(), &['a', 'a', 'b', 'b']);
        assert!(scores[0].is_nan());
    }

    #[test]
    fn test_selects_discriminative_columns_in_original_order() {
        // Column 1 and 3 separate the classes, columns 0 and 2 are noise.
        let data = array![
            [0.5, 0.0, 0.3, 10.0],
            [0.1, 0.1, 0.9, 11.0],
            [0.9, 0.2, 0.1, 10.5],
            [0.4, 5.0, 0.8, 0.0],
            [0.6, 5.1, 0.2, 0.5],
            [0.2, 5.2, 0.7, 1.0]
        ];
        let labels = ['x', 'x', 'x', 'y', 'y', 'y'];
        let selector = AnovaSelector::new();

        assert_eq!(selector.top_k_indices(data.view(), &labels, 2).unwrap(), vec![1, 3]);
        let reduced = selector.select_top_k(data.view(), &labels, 2).unwrap();
        assert_eq!(reduced.column(0), data.column(1));
        assert_eq!(reduced.column(1), data.column(3));
    }

    #[test]
    fn test_nan_scores_rank_last() {
        let data = array![[1.0, 1.0], [1.0, 2.0], [1.0, 8.0], [1.0, 9.0]];
        let labels = ['a', 'a', 'b', 'b'];
        let keep = AnovaSelector::new()
            .top_k_indices(data.view(), &labels, 1)
            .unwrap();
        assert_eq!(keep, vec![1]);
    }

    #[test]
    fn test_rejects_bad_k() {
        let data = array![[1.0, 2.0], [3.0, 4.0]];
        let labels = ['a', 'b'];
        let selector = AnovaSelector::new();
        assert_eq!(
            selector.select_top_k(data.view(), &labels, 0),
            Err(EstimatorError::ZeroFeatures)
        );
        assert_eq!(
            selector.select_top_k(data.view(), &labels, 3),
            Err(EstimatorError::TooManyFeatures {
                requested: 3,
                available: 2
            })
        );
    }

    #[test]
    fn test_select_all_is_identity() {
        let data = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 0.0]];
        let labels = ['a', 'b', 'a'];
        let reduced = AnovaSelector::new()
            .select_top_k(data.view(), &labels, 3)
            .unwrap();
        assert_eq!(reduced, data);
    }
}
