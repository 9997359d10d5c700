//! Extract step of the DVF pipeline.
//!
//! Fetches the compressed yearly export from the open data portal and
//! leaves the decompressed CSV at the configured source path.

mod decompress;
mod download;
mod error;

use std::path::PathBuf;

use dvf_model::PipelineConfig;

pub use decompress::decompress;
pub use download::download;
pub use error::{ExtractError, Result};

/// Download and decompress the export for the configured year.
///
/// Returns the path of the decompressed CSV.
pub fn extract(config: &PipelineConfig) -> Result<PathBuf> {
    let _span = tracing::info_span!("extract", year = config.year).entered();

    std::fs::create_dir_all(&config.data_dir).map_err(|e| ExtractError::io(&config.data_dir, e))?;

    let archive = config.archive_path();
    let source = config.source_path();
    download(&config.download_url(), &archive)?;
    decompress(&archive, &source)?;

    tracing::info!(path = %source.display(), "Source file ready");
    Ok(source)
}
