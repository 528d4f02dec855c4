//! K-Nearest Neighbors classifier
//!
//! Classifies each sample by majority vote among the k closest training
//! rows under Euclidean distance.

use std::collections::BTreeMap;

use ndarray::{Array2, ArrayView1, ArrayView2};

use super::Classifier;
use crate::error::EstimatorError;

/// KNN Classifier over single-character labels.
#[derive(Debug, Clone, Default)]
pub struct KnnClassifier {
    k: usize,
    x_train: Option<Array2<f64>>,
    y_train: Vec<char>,
}

impl KnnClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Predict a label for every row of `x`.
    pub fn predict(&self, x: ArrayView2<'_, f64>) -> Result<Vec<char>, EstimatorError> {
        let x_train = self.x_train.as_ref().ok_or(EstimatorError::NotFitted)?;
        if x.ncols() != x_train.ncols() {
            return Err(EstimatorError::DimensionMismatch {
                expected: x_train.ncols(),
                found: x.ncols(),
            });
        }

        let predictions = x
            .rows()
            .into_iter()
            .map(|sample| {
                let mut distances: Vec<(usize, f64)> = x_train
                    .rows()
                    .into_iter()
                    .enumerate()
                    .map(|(i, train_sample)| (i, squared_distance(sample, train_sample)))
                    .collect();

                // Stable: equidistant neighbors keep training order.
                distances.sort_by(|a, b| a.1.total_cmp(&b.1));
                distances.truncate(self.k);

                self.uniform_vote(&distances)
            })
            .collect();

        Ok(predictions)
    }

    /// Majority vote; ties go to the smallest label.
    fn uniform_vote(&self, neighbors: &[(usize, f64)]) -> char {
        let mut votes: BTreeMap<char, usize> = BTreeMap::new();
        for (idx, _) in neighbors {
            *votes.entry(self.y_train[*idx]).or_insert(0) += 1;
        }

        let mut best: Option<(char, usize)> = None;
        for (label, count) in votes {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((label, count));
            }
        }
        // `fit` guarantees k >= 1 and a non-empty training set.
        best.map(|(label, _)| label).unwrap_or_default()
    }
}

impl Classifier for KnnClassifier {
    fn fit(
        &mut self,
        data: ArrayView2<'_, f64>,
        labels: &[char],
        k_neighbors: usize,
    ) -> Result<(), EstimatorError> {
        if k_neighbors == 0 {
            return Err(EstimatorError::ZeroNeighbors);
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
        if k_neighbors > data.nrows() {
            return Err(EstimatorError::TooManyNeighbors {
                requested: k_neighbors,
                available: data.nrows(),
            });
        }

        self.k = k_neighbors;
        self.x_train = Some(data.to_owned());
        self.y_train = labels.to_vec();
        Ok(())
    }

    fn score(&self, data: ArrayView2<'_, f64>, labels: &[char]) -> Result<f64, EstimatorError> {
        if data.nrows() != labels.len() {
            return Err(EstimatorError::DimensionMismatch {
                expected: data.nrows(),
                found: labels.len(),
            });
        }
        if labels.is_empty() {
            return Ok(0.0);
        }

        let predictions = self.predict(data)?;
        let correct = predictions
            .iter()
            .zip(labels)
            .filter(|(p, t)| p == t)
            .count();

        Ok(correct as f64 / labels.len() as f64)
    }
}

fn squared_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).powi(2)).sum()
}
