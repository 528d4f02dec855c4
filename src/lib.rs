//! # knn-sweep
//!
//! Evaluates a k-Nearest-Neighbors classifier over a grid of neighbor counts
//! and selected-feature counts, using a labelled feature table read from a
//! delimited text file.
//!
//! - [`data`]: table parsing, label-run train/test split, feature alignment
//!   and projection
//! - [`estimator`]: feature selector and classifier traits with ANOVA and kNN
//!   implementations
//! - [`sweep`]: the hyperparameter sweep
//! - [`report`]: CSV score report

pub mod config;
pub mod data;
pub mod error;
pub mod estimator;
pub mod report;
pub mod sweep;

pub use config::Config;
pub use data::model::{FeatureTable, Partition, Split};
pub use error::{AlignmentError, ConfigError, EstimatorError, ParseError, SweepError};
pub use estimator::{AnovaSelector, Classifier, FeatureSelector, KnnClassifier};
pub use report::{ScoreRecord, ScoreWriter};
