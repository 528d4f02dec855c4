//! Hyperparameter sweep over neighbor counts and selected-feature counts.

use std::io::Write;
use std::time::Instant;

use log::{debug, info};

use crate::config::SweepConfig;
use crate::data::features::{align_features, project_rows};
use crate::data::model::{FeatureTable, Split};
use crate::error::SweepError;
use crate::estimator::{Classifier, FeatureSelector};
use crate::report::{ScoreRecord, ScoreWriter};

/// Score one combination.
///
/// Selects `k_features` columns on the training partition, recovers their
/// names by probing against the unreduced training rows, projects the test
/// partition onto them, then fits with `k_neighbors` and scores on the
/// projected test rows.
pub fn evaluate<S, C>(
    table: &FeatureTable,
    split: &Split,
    selector: &S,
    classifier: &mut C,
    k_neighbors: usize,
    k_features: usize,
) -> Result<f64, SweepError>
where
    S: FeatureSelector + ?Sized,
    C: Classifier + ?Sized,
{
    let training = &split.training;
    let testing = &split.testing;

    let reduced = selector.select_top_k(training.view(), &training.labels, k_features)?;
    let selected = align_features(training.view(), reduced.view(), &table.features)?;
    let test_data = project_rows(testing.view(), &table.features, &selected)?;

    classifier.fit(reduced.view(), &training.labels, k_neighbors)?;
    let score = classifier.score(test_data.view(), &testing.labels)?;
    Ok(score)
}

/// Run every combination in `config`, appending each result to `report`.
///
/// Neighbor counts form the outer loop and feature counts the inner loop.
/// The first failing combination aborts the sweep; rows already appended
/// stay in the report.
pub fn run_sweep<S, C, W>(
    table: &FeatureTable,
    split: &Split,
    config: &SweepConfig,
    selector: &S,
    classifier: &mut C,
    report: &mut ScoreWriter<W>,
) -> Result<Vec<ScoreRecord>, SweepError>
where
    S: FeatureSelector + ?Sized,
    C: Classifier + ?Sized,
    W: Write,
{
    if split.testing.is_empty() {
        return Err(SweepError::EmptyTestPartition);
    }

    info!(
        "Sweeping {} combinations over {} training / {} testing rows",
        config.combinations(),
        split.training.len(),
        split.testing.len()
    );

    let mut records = Vec::with_capacity(config.combinations());

    for k_neighbors in config.neighbor_counts() {
        for k_features in config.feature_counts() {
            let start = Instant::now();
            let score = evaluate(table, split, selector, classifier, k_neighbors, k_features)?;
            let time = start.elapsed().as_secs_f64();

            let record = ScoreRecord {
                k_neighbors,
                k_features,
                score,
                time,
            };
            report.append(&record)?;
            info!("k_neighbors={k_neighbors} k_features={k_features} score={score:.4} time={time:.3}s");
            records.push(record);
        }
        debug!("Finished k_neighbors={k_neighbors}");
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::split::split_table;
    use crate::error::EstimatorError;
    use crate::estimator::{AnovaSelector, KnnClassifier};
    use approx::assert_abs_diff_eq;
    use ndarray::{Array2, ArrayView2};

    /// Two classes separable on column 1; column 0 and 2 are noise.
    /// Columns 0 and 1 share their first-row value.
    fn table() -> FeatureTable {
        let rows = [
            ('a', [0.0, 0.0, 0.7]),
            ('a', [0.9, 0.1, 0.2]),
            ('a', [0.1, 0.2, 0.5]),
            ('a', [0.6, 0.1, 0.4]),
            ('b', [0.4, 9.0, 0.1]),
            ('b', [0.2, 9.1, 0.8]),
            ('b', [0.8, 9.2, 0.3]),
            ('b', [0.5, 9.1, 0.6]),
        ];
        let data = Array2::from_shape_fn((rows.len(), 3), |(i, j)| rows[i].1[j]);
        let labels = rows.iter().map(|r| r.0).collect();
        FeatureTable::new(data, vec!["f0".into(), "f1".into(), "f2".into()], labels).unwrap()
    }

    fn config(features_max: usize) -> SweepConfig {
        SweepConfig {
            neighbors_min: 1,
            neighbors_max: 3,
            features_min: 1,
            features_max,
            features_step: 1,
        }
    }

    #[test]
    fn test_evaluate_separable_data() {
        let table = table();
        let split = split_table(&table, 3).unwrap();
        let score = evaluate(
            &table,
            &split,
            &AnovaSelector::new(),
            &mut KnnClassifier::new(),
            1,
            1,
        )
        .unwrap();
        assert_abs_diff_eq!(score, 1.0);
    }

    #[test]
    fn test_run_sweep_records_every_combination() {
        let table = table();
        let split = split_table(&table, 3).unwrap();
        let mut report = ScoreWriter::new(Vec::new()).unwrap();

        let records = run_sweep(
            &table,
            &split,
            &config(4),
            &AnovaSelector::new(),
            &mut KnnClassifier::new(),
            &mut report,
        )
        .unwrap();

        let combos: Vec<(usize, usize)> =
            records.iter().map(|r| (r.k_neighbors, r.k_features)).collect();
        assert_eq!(combos, vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3)]);
        assert!(records.iter().all(|r| (0.0..=1.0).contains(&r.score)));
        assert!(records.iter().all(|r| r.time >= 0.0));

        let text = String::from_utf8(report.into_inner().unwrap()).unwrap();
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn test_too_many_features_aborts_but_keeps_rows() {
        let table = table();
        let split = split_table(&table, 3).unwrap();
        let mut report = ScoreWriter::new(Vec::new()).unwrap();

        let err = run_sweep(
            &table,
            &split,
            &config(5),
            &AnovaSelector::new(),
            &mut KnnClassifier::new(),
            &mut report,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SweepError::Estimator(EstimatorError::TooManyFeatures {
                requested: 4,
                available: 3
            })
        ));

        let text = String::from_utf8(report.into_inner().unwrap()).unwrap();
        // Header plus k_features 1..=3 for k_neighbors = 1.
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_first_combination_failure_leaves_header() {
        let table = table();
        let split = split_table(&table, 3).unwrap();
        let mut report = ScoreWriter::new(Vec::new()).unwrap();
        let mut sweep = config(10);
        sweep.features_min = 5;

        let result = run_sweep(
            &table,
            &split,
            &sweep,
            &AnovaSelector::new(),
            &mut KnnClassifier::new(),
            &mut report,
        );
        assert!(result.is_err());

        let text = String::from_utf8(report.into_inner().unwrap()).unwrap();
        assert_eq!(text, "k_neighbors,k_features,score,time\n");
    }

    #[test]
    fn test_empty_test_partition_rejected() {
        let table = table();
        let split = split_table(&table, 10).unwrap();
        let mut report = ScoreWriter::new(Vec::new()).unwrap();
        let err = run_sweep(
            &table,
            &split,
            &config(2),
            &AnovaSelector::new(),
            &mut KnnClassifier::new(),
            &mut report,
        )
        .unwrap_err();
        assert!(matches!(err, SweepError::EmptyTestPartition));
    }

    /// Returns its columns reversed, breaking the order-preserving contract.
    struct ReversingSelector;

    impl FeatureSelector for ReversingSelector {
        fn select_top_k(
            &self,
            data: ArrayView2<'_, f64>,
            _labels: &[char],
            _k: usize,
        ) -> Result<Array2<f64>, EstimatorError> {
            Ok(data.slice(ndarray::s![.., ..;-1]).to_owned())
        }
    }

    #[test]
    fn test_out_of_order_selector_fails_fast() {
        let table = table();
        let split = split_table(&table, 3).unwrap();
        let err = evaluate(
            &table,
            &split,
            &ReversingSelector,
            &mut KnnClassifier::new(),
            1,
            3,
        )
        .unwrap_err();
        assert!(matches!(err, SweepError::Alignment(_)));
    }
}
