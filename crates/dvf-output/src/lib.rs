//! Output generation for the transformed DVF table.
//!
//! - **delimited**: CSV with a leading row index column
//! - **documents**: JSON array of records for document database import

mod common;
mod delimited;
mod documents;
mod error;

use std::path::{Path, PathBuf};
use std::time::Instant;

use dvf_model::{DateRendering, OutputFormat, PipelineConfig};
use polars::prelude::DataFrame;

pub use common::ensure_parent_dir;
pub use delimited::{INDEX_HEADER, csv_string, write_csv};
pub use documents::{documents, write_json};
pub use error::{OutputError, Result};

/// Write the table in the requested format, replacing any existing file.
pub fn write_table(
    df: &DataFrame,
    path: &Path,
    format: OutputFormat,
    rendering: DateRendering,
) -> Result<()> {
    let start = Instant::now();
    match format {
        OutputFormat::Csv => write_csv(df, path)?,
        OutputFormat::Json => write_json(df, path, rendering)?,
    }
    tracing::info!(
        path = %path.display(),
        format = format.extension(),
        rows = df.height(),
        duration_ms = start.elapsed().as_millis(),
        "Wrote transformed table"
    );
    Ok(())
}

/// Persist the table at the configured output path when saving is enabled.
///
/// Returns the written path, or `None` when saving is disabled.
pub fn write_output(df: &DataFrame, config: &PipelineConfig) -> Result<Option<PathBuf>> {
    if !config.save {
        tracing::debug!("Saving disabled, transformed table not written");
        return Ok(None);
    }
    let path = config.output_path();
    write_table(df, &path, config.output_format, config.date_rendering)?;
    Ok(Some(path))
}
