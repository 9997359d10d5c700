//! DVF processing pipeline with explicit stages.
//!
//! The stages run strictly in this order:
//! 1. **Extract**: download and decompress the yearly export (optional)
//! 2. **Load**: read the source CSV into the canonical typed table
//! 3. **Null filter**: drop incomplete records
//! 4. **Normalize**: canonical categorical values, apartments and houses
//!    only
//! 5. **Validate category**: purchases only
//! 6. **Validate price**, then **validate surface**
//! 7. **Aggregate**: one record per mutation
//! 8. **Save**: write the transformed table when saving is enabled
//! 9. **Import**: hand the file to the document database (optional)
//!
//! Each stage takes the table produced by the previous one. The first
//! failure aborts the run; nothing is retried.

use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use dvf_ingest::read_mapped_table;
use dvf_load::{ImportRequest, run_import};
use dvf_model::{DVF_SCHEMA, PipelineConfig, SEARCH_TYPE, fields, validate_schema};
use dvf_transform::{
    drop_incomplete, group_by_mutation, normalize_fields, validate_category, validate_range,
};
use polars::prelude::DataFrame;
use tracing::{info, info_span};

use crate::error::{EtlError, StageError};
use crate::progress::StageProgress;

/// A pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extract,
    Load,
    NullFilter,
    Normalize,
    ValidateCategory,
    ValidatePrice,
    ValidateSurface,
    Aggregate,
    Save,
    Import,
}

impl Stage {
    /// Stages of the transform part, in execution order.
    pub const TRANSFORM: [Stage; 8] = [
        Stage::Load,
        Stage::NullFilter,
        Stage::Normalize,
        Stage::ValidateCategory,
        Stage::ValidatePrice,
        Stage::ValidateSurface,
        Stage::Aggregate,
        Stage::Save,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Extract => "extract",
            Self::Load => "load",
            Self::NullFilter => "null_filter",
            Self::Normalize => "normalize",
            Self::ValidateCategory => "validate_category",
            Self::ValidatePrice => "validate_price",
            Self::ValidateSurface => "validate_surface",
            Self::Aggregate => "aggregate",
            Self::Save => "save",
            Self::Import => "import",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one completed stage.
#[derive(Debug, Clone)]
pub struct StageRecord {
    pub stage: Stage,
    /// Rows in the table after the stage, for table stages.
    pub rows: Option<usize>,
    pub duration: Duration,
}

/// Which collaborators a full run invokes.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub skip_extract: bool,
    pub skip_load: bool,
    /// Keep the transformed file once imported.
    pub keep_imported: bool,
}

impl RunOptions {
    /// Number of stages the run executes.
    pub fn stage_count(&self) -> usize {
        Stage::TRANSFORM.len() + usize::from(!self.skip_extract) + usize::from(!self.skip_load)
    }
}

/// Result of a run.
#[derive(Debug)]
pub struct RunReport {
    pub year: u16,
    pub stages: Vec<StageRecord>,
    /// Transformed file, when it was written (and not consumed by the import).
    pub output: Option<PathBuf>,
    /// `database.collection` the table was imported into.
    pub imported_into: Option<String>,
    /// The final table.
    pub table: DataFrame,
}

impl RunReport {
    pub fn final_rows(&self) -> usize {
        self.table.height()
    }
}

/// Runs stages in order, recording their outcome.
struct StageRunner<'a> {
    progress: &'a StageProgress,
    records: Vec<StageRecord>,
}

impl<'a> StageRunner<'a> {
    fn new(progress: &'a StageProgress) -> Self {
        Self {
            progress,
            records: Vec::new(),
        }
    }

    fn step<T, E>(&mut self, stage: Stage, f: impl FnOnce() -> Result<T, E>) -> Result<T, StageError>
    where
        E: Into<EtlError>,
    {
        let span = info_span!("stage", stage = %stage);
        let _guard = span.enter();
        self.progress.start(stage);
        let start = Instant::now();

        match f() {
            Ok(value) => {
                self.progress.complete();
                self.records.push(StageRecord {
                    stage,
                    rows: None,
                    duration: start.elapsed(),
                });
                Ok(value)
            }
            Err(error) => {
                let source = error.into();
                tracing::error!(stage = %stage, error = %source, "Stage failed");
                self.progress.fail(stage);
                Err(StageError { stage, source })
            }
        }
    }

    fn table<E>(
        &mut self,
        stage: Stage,
        f: impl FnOnce() -> Result<DataFrame, E>,
    ) -> Result<DataFrame, StageError>
    where
        E: Into<EtlError>,
    {
        let df = self.step(stage, f)?;
        if let Some(record) = self.records.last_mut() {
            record.rows = Some(df.height());
        }
        Ok(df)
    }
}

/// Run the transform stages on the configured source file.
///
/// Expects the decompressed source at `config.source_path()`.
pub fn run_transform(config: &PipelineConfig, progress: &StageProgress) -> Result<RunReport, StageError> {
    let mut runner = StageRunner::new(progress);
    let (table, output) = transform(&mut runner, config)?;
    progress.finish();
    Ok(RunReport {
        year: config.year,
        stages: runner.records,
        output,
        imported_into: None,
        table,
    })
}

/// Run extract, transform and load for the configured year.
pub fn run_etl(
    config: &PipelineConfig,
    options: RunOptions,
    progress: &StageProgress,
) -> Result<RunReport, StageError> {
    let span = info_span!("etl", year = config.year);
    let _guard = span.enter();
    let mut runner = StageRunner::new(progress);

    if options.skip_extract {
        info!(path = %config.source_path().display(), "Skipping extract, using existing source");
    } else {
        runner.step(Stage::Extract, || dvf_extract::extract(config))?;
    }

    let (table, mut output) = transform(&mut runner, config)?;

    let mut imported_into = None;
    if !options.skip_load {
        let request = runner.step(Stage::Import, || {
            let mut request = ImportRequest::from_config(config)?;
            request.keep_file = options.keep_imported;
            run_import(&request)?;
            Ok::<_, dvf_load::LoadError>(request)
        })?;
        imported_into = Some(format!("{}.{}", request.database, request.collection));
        if !request.keep_file {
            output = None;
        }
    }

    progress.finish();
    Ok(RunReport {
        year: config.year,
        stages: runner.records,
        output,
        imported_into,
        table,
    })
}

fn transform(
    runner: &mut StageRunner<'_>,
    config: &PipelineConfig,
) -> Result<(DataFrame, Option<PathBuf>), StageError> {
    let source = config.source_path();

    let df = runner.table(Stage::Load, || {
        validate_schema(DVF_SCHEMA)?;
        read_mapped_table(&source, DVF_SCHEMA).map_err(EtlError::from)
    })?;
    let df = runner.table(Stage::NullFilter, || {
        drop_incomplete(df, &config.field_groups)
    })?;
    let df = runner.table(Stage::Normalize, || normalize_fields(df))?;
    let df = runner.table(Stage::ValidateCategory, || {
        validate_category(df, fields::TYPE_OF_SEARCH, SEARCH_TYPE)
    })?;
    let df = runner.table(Stage::ValidatePrice, || {
        validate_range(df, fields::PRICE, config.price_bounds)
    })?;
    let df = runner.table(Stage::ValidateSurface, || {
        validate_range(df, fields::SURFACE, config.surface_bounds)
    })?;
    let df = runner.table(Stage::Aggregate, || group_by_mutation(df))?;
    let output = runner.step(Stage::Save, || dvf_output::write_output(&df, config))?;

    info!(
        year = config.year,
        rows = df.height(),
        output = ?output,
        "Transform complete"
    );
    Ok((df, output))
}
