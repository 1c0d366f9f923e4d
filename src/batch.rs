use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use rand::SeedableRng as _;
use rand::rngs::StdRng;
use rayon::prelude::*;
use tracing::{error, info};

use crate::canvas::encode;
use crate::color;
use crate::foundation::error::{PlacegenError, PlacegenResult};
use crate::label;
use crate::table::csv;
use crate::table::row::{RawRow, ValidatedRow, validate_row};

/// Diagnostic record for one data row. Never persisted; surfaced to the caller
/// and the log only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowOutcome {
    /// 1-based file line number (the header is line 1).
    pub line: usize,
    pub success: bool,
    /// Defects for rejected rows, the error for failed rows, or the one-line
    /// summary for written rows. Ordered within the row.
    pub messages: Vec<String>,
}

/// Result of a whole batch run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOutcome {
    /// The input table does not exist; nothing was processed.
    NoInput,
    /// The table was parsed and every row reached a terminal state, one
    /// outcome per data row in input order.
    Completed(Vec<RowOutcome>),
}

#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Input CSV table path.
    pub input: PathBuf,
    /// Directory all generated images are written into, flat.
    pub out_dir: PathBuf,
    /// Fixed RNG seed for reproducible colors. `None` draws from the thread
    /// RNG.
    pub seed: Option<u64>,
}

/// Run the whole batch: read the table, fan rows out to independent worker
/// tasks, and join them.
///
/// Row-scoped problems (validation defects, label rasterization failures,
/// encode/write failures) are logged and recorded in that row's
/// [`RowOutcome`]; they never fail the batch. Only a structural table parse
/// error or an unusable output directory aborts the run.
pub fn run_batch(cfg: &BatchConfig) -> PlacegenResult<BatchOutcome> {
    ensure_out_dir(&cfg.out_dir)?;

    let Some(rows) = csv::read_rows(&cfg.input)? else {
        return Ok(BatchOutcome::NoInput);
    };

    let fontdb = label::system_fontdb();
    let outcomes: Vec<RowOutcome> = rows
        .par_iter()
        .map(|raw| process_row(raw, cfg, &fontdb))
        .collect();

    Ok(BatchOutcome::Completed(outcomes))
}

/// Drive one row to a terminal state:
/// `Validating -> (Rejected | Generating) -> (Written | Failed)`.
fn process_row(
    raw: &RawRow,
    cfg: &BatchConfig,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> RowOutcome {
    let line = raw.line;
    let row = match validate_row(raw) {
        Ok(row) => row,
        Err(defects) => {
            for defect in &defects {
                error!("#{line}: {defect}");
            }
            return RowOutcome {
                line,
                success: false,
                messages: defects,
            };
        }
    };

    match generate_row(&row, cfg, fontdb) {
        Ok(()) => {
            let summary = format!("w {}px x h {}px / {}", row.width, row.height, row.format);
            info!("#{line}: {summary}");
            RowOutcome {
                line,
                success: true,
                messages: vec![summary],
            }
        }
        Err(err) => {
            error!("#{line}: {err}");
            RowOutcome {
                line,
                success: false,
                messages: vec![err.to_string()],
            }
        }
    }
}

fn generate_row(
    row: &ValidatedRow,
    cfg: &BatchConfig,
    fontdb: &Arc<usvg::fontdb::Database>,
) -> PlacegenResult<()> {
    let colors = match cfg.seed {
        Some(seed) => {
            // Derive a per-row stream so seeded runs stay deterministic under
            // any row completion order.
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(row.line as u64));
            color::contrast_pair(&mut rng)
        }
        None => color::contrast_pair(&mut rand::thread_rng()),
    };

    let layer = label::render_label(
        &row.file_name(),
        colors.foreground,
        row.width,
        row.height,
        fontdb,
    )
    .map_err(|err| PlacegenError::render(format!("Failed to create text: {err}")))?;

    let image = encode::compose(row, &colors, &layer)?;
    encode::write_image(&cfg.out_dir, row, &image)?;
    Ok(())
}

fn ensure_out_dir(dir: &Path) -> PlacegenResult<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(PlacegenError::validation(format!(
            "output path '{}' exists and is not a directory",
            dir.display()
        )));
    }
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/batch.rs"]
mod tests;
