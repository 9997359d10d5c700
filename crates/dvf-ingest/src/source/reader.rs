//! Streaming projection of a DVF CSV file into a typed DataFrame.

use std::path::Path;
use std::time::Instant;

use csv::{ReaderBuilder, StringRecord};
use dvf_model::{DVF_SCHEMA, SourceField, validate_schema};
use polars::prelude::*;

use crate::error::{IngestError, Result};

use super::coerce::ColumnBuilder;
use super::header::resolve_columns;

/// Load a DVF yearly file with the standard field mapping.
pub fn read_dvf_table(path: &Path) -> Result<DataFrame> {
    read_mapped_table(path, DVF_SCHEMA)
}

/// Load the mapped fields of a CSV file.
///
/// The result has exactly one column per mapping entry, named by its
/// canonical name, in mapping order. Unmapped columns are skipped.
pub fn read_mapped_table(path: &Path, schema: &[SourceField]) -> Result<DataFrame> {
    validate_schema(schema)?;
    let start = Instant::now();

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .map_err(|e| open_error(path, e))?;

    let headers = reader
        .headers()
        .map_err(|e| csv_error(path, &e))?
        .clone();
    let positions = resolve_columns(&headers, schema, path)?;
    tracing::debug!(
        path = %path.display(),
        source_columns = headers.len(),
        mapped = positions.len(),
        "Resolved source columns"
    );

    let mut builders: Vec<ColumnBuilder> = schema.iter().map(ColumnBuilder::new).collect();
    let mut record = StringRecord::new();
    let mut line = 1u64;
    while reader
        .read_record(&mut record)
        .map_err(|e| csv_error(path, &e))?
    {
        line = record.position().map_or(line + 1, |p| p.line());
        for ((builder, field), &position) in builders.iter_mut().zip(schema).zip(&positions) {
            let raw = record.get(position).unwrap_or("");
            if !builder.push(raw) {
                tracing::error!(
                    path = %path.display(),
                    line,
                    field = field.source,
                    value = raw.trim(),
                    expected = field.field_type.label(),
                    "Malformed source value"
                );
                return Err(IngestError::MalformedInput {
                    path: path.to_path_buf(),
                    line,
                    field: field.source.to_string(),
                    value: raw.trim().to_string(),
                    expected: field.field_type.label(),
                });
            }
        }
    }

    let columns = builders
        .into_iter()
        .map(ColumnBuilder::finish)
        .collect::<PolarsResult<Vec<Column>>>()?;
    let df = DataFrame::new(columns)?;

    tracing::info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        duration_ms = start.elapsed().as_millis(),
        "Loaded source table"
    );
    Ok(df)
}

fn open_error(path: &Path, err: csv::Error) -> IngestError {
    match err.into_kind() {
        csv::ErrorKind::Io(e) if e.kind() == std::io::ErrorKind::NotFound => {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        }
        csv::ErrorKind::Io(e) => IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        },
        other => IngestError::CsvParse {
            path: path.to_path_buf(),
            message: format!("{other:?}"),
        },
    }
}

fn csv_error(path: &Path, err: &csv::Error) -> IngestError {
    IngestError::CsvParse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}
