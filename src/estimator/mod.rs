//! Feature selection and classification collaborators.
//!
//! The sweep only talks to the two traits below; [`AnovaSelector`] and
//! [`KnnClassifier`] are the implementations the binary wires in.

pub mod anova;
pub mod knn;

use ndarray::{Array2, ArrayView2};

use crate::error::EstimatorError;

pub use anova::AnovaSelector;
pub use knn::KnnClassifier;

/// Picks the `k` most class-discriminative columns of a training matrix.
pub trait FeatureSelector {
    /// Return the retained columns of `data`.
    ///
    /// Implementations must keep the retained columns in their original
    /// relative order; feature alignment depends on it.
    fn select_top_k(
        &self,
        data: ArrayView2<'_, f64>,
        labels: &[char],
        k: usize,
    ) -> Result<Array2<f64>, EstimatorError>;
}

/// A classifier parameterised by a neighbor count.
pub trait Classifier {
    fn fit(
        &mut self,
        data: ArrayView2<'_, f64>,
        labels: &[char],
        k_neighbors: usize,
    ) -> Result<(), EstimatorError>;

    /// Fraction of `labels` predicted correctly, in `[0, 1]`.
    fn score(&self, data: ArrayView2<'_, f64>, labels: &[char]) -> Result<f64, EstimatorError>;
}
