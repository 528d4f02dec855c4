use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;

use knn_sweep::data::loader::load_table;
use knn_sweep::data::split::split_table;
use knn_sweep::report::best_record;
use knn_sweep::sweep::run_sweep;
use knn_sweep::{AnovaSelector, Config, KnnClassifier, ScoreWriter};

fn main() -> Result<()> {
    env_logger::init();

    // Optional single argument: path to a JSON config.
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            Config::load(&path).with_context(|| format!("loading config {path:?}"))?
        }
        None => Config::default(),
    };

    let table = load_table(&config.input, config.table.label_offset)
        .with_context(|| format!("reading table {:?}", config.input))?;

    let split = split_table(&table, config.split.training_run_length)
        .context("splitting table")?;
    info!(
        "Training rows: {}, testing rows: {}",
        split.training.len(),
        split.testing.len()
    );

    let mut report = ScoreWriter::create(&config.output)
        .with_context(|| format!("creating report {:?}", config.output))?;

    let records = run_sweep(
        &table,
        &split,
        &config.sweep,
        &AnovaSelector::new(),
        &mut KnnClassifier::new(),
        &mut report,
    )
    .context("running sweep")?;

    if let Some(best) = best_record(&records) {
        info!(
            "Best: k_neighbors={} k_features={} score={:.4}",
            best.k_neighbors, best.k_features, best.score
        );
    }
    info!("Wrote {} rows to {:?}", records.len(), config.output);

    Ok(())
}
