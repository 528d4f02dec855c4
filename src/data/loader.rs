use std::io::Read;
use std::path::Path;

use log::{debug, info};
use ndarray::Array2;

use super::model::FeatureTable;
use crate::error::ParseError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a feature table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`         – comma-separated
/// * `.tsv`, `.tab` – tab-separated
///
/// Layout in both cases:
///
/// ```text
/// marker,     f1,  f2,  ...
/// <label>,    v11, v12, ...
/// <label>,    v21, v22, ...
/// ```
///
/// The canonical label of a row is the single character at `label_offset`
/// in its first cell.
pub fn load_table(path: &Path, label_offset: usize) -> Result<FeatureTable, ParseError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let delimiter = match ext.as_str() {
        "csv" => b',',
        "tsv" | "tab" => b'\t',
        other => return Err(ParseError::UnsupportedExtension(other.to_string())),
    };

    let file = std::fs::File::open(path)?;
    let table = parse_table(file, delimiter, label_offset)?;
    info!(
        "Loaded {path:?}: {} rows x {} features",
        table.n_rows(),
        table.n_features()
    );
    Ok(table)
}

/// Parse a delimited table from any reader.
///
/// The first record is the header; every following record must have the
/// same number of cells, and every interior cell must be a finite number.
/// A file holding only a header (or nothing at all) yields an empty table.
pub fn parse_table<R: Read>(
    reader: R,
    delimiter: u8,
    label_offset: usize,
) -> Result<FeatureTable, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut records = reader.records();

    let header = match records.next() {
        Some(result) => result?,
        None => {
            debug!("Table has no header row");
            return Ok(FeatureTable {
                data: Array2::zeros((0, 0)),
                features: Vec::new(),
                labels: Vec::new(),
            });
        }
    };

    let width = header.len();
    let features: Vec<String> = header.iter().skip(1).map(|h| h.to_string()).collect();
    let n_features = features.len();

    let mut values = Vec::new();
    let mut labels = Vec::new();

    for (i, result) in records.enumerate() {
        let row = i + 1;
        let record = result?;

        if record.len() != width {
            return Err(ParseError::Ragged {
                row,
                expected: width,
                found: record.len(),
            });
        }

        labels.push(canonical_label(record.get(0).unwrap_or(""), row, label_offset)?);

        for (column, cell) in record.iter().enumerate().skip(1) {
            let value = cell
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ParseError::NotNumeric {
                    row,
                    column,
                    value: cell.to_string(),
                })?;
            values.push(value);
        }
    }

    let data = Array2::from_shape_vec((labels.len(), n_features), values)?;

    Ok(FeatureTable {
        data,
        features,
        labels,
    })
}

/// Reduce a raw label cell to the single character at `offset`.
fn canonical_label(raw: &str, row: usize, offset: usize) -> Result<char, ParseError> {
    raw.chars().nth(offset).ok_or_else(|| ParseError::ShortLabel {
        row,
        label: raw.to_string(),
        len: raw.chars().count(),
        offset,
    })
}
