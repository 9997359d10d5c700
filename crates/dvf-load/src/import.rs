//! `mongoimport` invocation.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use dvf_model::{OutputFormat, PipelineConfig};

use crate::error::{LoadError, Result};

/// Default import tool.
pub const MONGOIMPORT: &str = "mongoimport";

/// One import of a transformed file into a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRequest {
    pub database: String,
    pub collection: String,
    pub file: PathBuf,
    pub format: OutputFormat,
    /// Drop the collection before importing.
    pub replace: bool,
    /// Silence the tool's own output.
    pub quiet: bool,
    /// Keep the file after a successful import.
    pub keep_file: bool,
}

impl ImportRequest {
    /// Request importing the configured output file.
    pub fn from_config(config: &PipelineConfig) -> Result<Self> {
        let (database, collection) = config.load_target()?;
        Ok(Self {
            database: database.to_string(),
            collection: collection.to_string(),
            file: config.output_path(),
            format: config.output_format,
            replace: config.replace,
            quiet: !config.verbose,
            keep_file: false,
        })
    }

    /// Arguments passed to the import tool.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--db".into(),
            self.database.as_str().into(),
            "--collection".into(),
            self.collection.as_str().into(),
            "--type".into(),
            self.format.extension().into(),
            "--file".into(),
            self.file.as_os_str().to_owned(),
        ];
        args.push(
            match self.format {
                OutputFormat::Csv => "--headerline",
                OutputFormat::Json => "--jsonArray",
            }
            .into(),
        );
        if self.replace {
            args.push("--drop".into());
        }
        if self.quiet {
            args.push("--quiet".into());
        }
        args
    }
}

/// Build the `mongoimport` command for a request.
pub fn build_command(request: &ImportRequest) -> Command {
    command_for(MONGOIMPORT, request)
}

fn command_for(program: &str, request: &ImportRequest) -> Command {
    let mut command = Command::new(program);
    command.args(request.args());
    command
}

/// Run `mongoimport` and delete the imported file on success unless
/// `keep_file` is set.
pub fn run_import(request: &ImportRequest) -> Result<()> {
    run_import_with(MONGOIMPORT, request)
}

/// Run `program` with the import arguments, then clean up as
/// [`run_import`] does.
pub fn run_import_with(program: &str, request: &ImportRequest) -> Result<()> {
    if !request.file.exists() {
        return Err(LoadError::NotFound {
            path: request.file.clone(),
        });
    }

    let start = Instant::now();
    tracing::info!(
        program,
        database = %request.database,
        collection = %request.collection,
        file = %request.file.display(),
        replace = request.replace,
        "Starting import"
    );

    let status = command_for(program, request)
        .status()
        .map_err(|e| LoadError::Spawn {
            program: program.to_string(),
            source: e,
        })?;
    if !status.success() {
        tracing::error!(program, status = ?status.code(), "Import failed");
        return Err(LoadError::ToolFailed {
            program: program.to_string(),
            status: status.code(),
        });
    }

    if !request.keep_file {
        remove_imported(&request.file)?;
    }
    tracing::info!(
        collection = %request.collection,
        duration_ms = start.elapsed().as_millis(),
        "Import complete"
    );
    Ok(())
}

fn remove_imported(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|e| LoadError::Cleanup {
        path: path.to_path_buf(),
        source: e,
    })
}
