//! Dataset loading and feature scaling.
//!
//! # Format
//!
//! One record per line, cells separated by a delimiter (`,` by default).
//! The last cell is the label; every cell before it is a feature. Rows that
//! fail to parse, hold non-finite values, or disagree with the first row's
//! width are skipped with a warning.
//!
//! ```text
//! 103,0.4,62,1,1
//! 88,0.0,45,0,0
//! ```

use std::path::{Path, PathBuf};

use clap::Args;
use kmeans_trials_core::FeatureVector;
use tracing::{debug, warn};

use crate::error::{CliError, CliResult};

/// Options controlling how a dataset file is read.
#[derive(Args, Debug, Clone)]
pub struct DataOptions {
    /// Path to the delimited dataset
    #[arg(long, env = "KMEANS_DATA")]
    pub data: PathBuf,

    /// Cell delimiter
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Skip the first non-empty line
    #[arg(long)]
    pub header: bool,

    /// Leave features unscaled instead of z-scoring each column
    #[arg(long)]
    pub no_scale: bool,
}

/// Feature rows and labels read from a dataset, before vectors are built.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<f64>,
}

impl Dataset {
    /// Parse dataset text.
    pub fn parse(contents: &str, delimiter: char, has_header: bool) -> Self {
        let mut rows = Vec::new();
        let mut labels = Vec::new();
        let mut width: Option<usize> = None;

        let lines = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .skip(usize::from(has_header));

        for (index, line) in lines {
            let line_no = index + 1;
            let cells: Result<Vec<f64>, _> = line
                .split(delimiter)
                .map(|cell| cell.trim().parse::<f64>())
                .collect();

            let mut cells = match cells {
                Ok(cells) if cells.iter().all(|v| v.is_finite()) => cells,
                Ok(_) => {
                    warn!(line = line_no, "Skipping row with non-finite value");
                    continue;
                }
                Err(e) => {
                    warn!(line = line_no, error = %e, "Skipping unparsable row");
                    continue;
                }
            };

            if cells.len() < 2 {
                warn!(line = line_no, "Skipping row without features and label");
                continue;
            }
            match width {
                None => width = Some(cells.len()),
                Some(w) if w != cells.len() => {
                    warn!(line = line_no, expected = w, actual = cells.len(), "Skipping ragged row");
                    continue;
                }
                Some(_) => {}
            }

            let label = cells.pop().unwrap_or_default();
            rows.push(cells);
            labels.push(label);
        }

        Self { rows, labels }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Z-score every feature column: `(x - mean) / sd`, sample deviation.
    ///
    /// A column with no spread cannot be scaled; it is centered to 0.0.
    pub fn scale_columns(&mut self) {
        let Some(width) = self.rows.first().map(Vec::len) else {
            return;
        };
        let n = self.rows.len() as f64;

        for col in 0..width {
            let mean = self.rows.iter().map(|r| r[col]).sum::<f64>() / n;
            let variance = if self.rows.len() > 1 {
                self.rows.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / (n - 1.0)
            } else {
                0.0
            };
            let sd = variance.sqrt();

            if sd == 0.0 {
                warn!(column = col, "Column has zero deviation; centering only");
            }
            for row in self.rows.iter_mut() {
                row[col] = if sd == 0.0 { 0.0 } else { (row[col] - mean) / sd };
            }
            debug!(column = col, mean, sd, "Scaled column");
        }
    }

    /// Build feature vectors named `P000`, `P001`, ... in row order.
    pub fn into_vectors(self) -> Vec<FeatureVector> {
        self.rows
            .into_iter()
            .zip(self.labels)
            .enumerate()
            .map(|(i, (features, label))| FeatureVector::new(format!("P{:03}", i), features, label))
            .collect()
    }
}

/// Read a dataset file, scale it unless disabled, and build vectors.
///
/// # Errors
///
/// - `CliError::Io` if the file cannot be read
/// - `CliError::EmptyDataset` if no row survives parsing
pub fn load_vectors(options: &DataOptions) -> CliResult<Vec<FeatureVector>> {
    let mut dataset = read_dataset(&options.data, options.delimiter, options.header)?;
    if !options.no_scale {
        dataset.scale_columns();
    }
    Ok(dataset.into_vectors())
}

fn read_dataset(path: &Path, delimiter: char, has_header: bool) -> CliResult<Dataset> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let dataset = Dataset::parse(&contents, delimiter, has_header);
    if dataset.is_empty() {
        return Err(CliError::EmptyDataset {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), rows = dataset.len(), "Loaded dataset");
    Ok(dataset)
}
