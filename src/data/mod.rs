/// Data layer: table parsing, train/test split, feature alignment and projection.
///
/// Architecture:
/// ```text
///  .csv / .tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → FeatureTable (data, features, labels)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  split    │  label-run policy → training / testing Partition
///   └──────────┘
///        │                 selector output
///        ▼                       │
///   ┌──────────┐                 │
///   │ features  │ ◄──────────────┘  align: reduced columns → feature names
///   └──────────┘                    project: testing rows → selected columns
/// ```

pub mod features;
pub mod loader;
pub mod model;
pub mod split;
