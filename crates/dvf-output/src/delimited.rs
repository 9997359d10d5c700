//! Delimited text output.
//!
//! The first column is a 0-based row index headed [`INDEX_HEADER`]. Nulls
//! are empty cells, floats drop trailing zeros and dates render as
//! `YYYY-MM-DD`.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use csv::{Terminator, WriterBuilder};
use dvf_common::any_to_string;
use polars::prelude::DataFrame;

use crate::common::ensure_parent_dir;
use crate::error::{OutputError, Result};

/// Header of the row index column. The file is imported with its header
/// line, so every column needs a name.
pub const INDEX_HEADER: &str = "index";

/// Write the table as CSV, replacing any existing file.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).map_err(|e| OutputError::write_failed(path, e))?;
    write_records(df, BufWriter::new(file), path)
}

/// Render the table as CSV text.
pub fn csv_string(df: &DataFrame) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(df, &mut buffer, Path::new("<memory>"))?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_records<W: Write>(df: &DataFrame, sink: W, path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(sink);

    let mut header = Vec::with_capacity(df.width() + 1);
    header.push(INDEX_HEADER.to_string());
    header.extend(df.get_column_names().iter().map(|name| name.to_string()));
    writer
        .write_record(&header)
        .map_err(|e| OutputError::write_failed(path, e))?;

    let columns = df.get_columns();
    let mut record = Vec::with_capacity(header.len());
    for row in 0..df.height() {
        record.clear();
        record.push(row.to_string());
        for column in columns {
            record.push(any_to_string(column.get(row)?));
        }
        writer
            .write_record(&record)
            .map_err(|e| OutputError::write_failed(path, e))?;
    }

    writer.flush().map_err(|e| OutputError::write_failed(path, e))?;
    Ok(())
}
