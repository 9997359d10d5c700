//! Gzip decompression of a downloaded archive.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{ExtractError, Result};

/// Decompress `archive` into `dest`, then delete the archive.
///
/// An existing `dest` is overwritten. Returns the decompressed size.
pub fn decompress(archive: &Path, dest: &Path) -> Result<u64> {
    let input = File::open(archive).map_err(|e| ExtractError::io(archive, e))?;
    let mut decoder = MultiGzDecoder::new(BufReader::new(input));

    let output = File::create(dest).map_err(|e| ExtractError::io(dest, e))?;
    let mut writer = BufWriter::new(output);
    let bytes = io::copy(&mut decoder, &mut writer).map_err(|e| {
        tracing::error!(archive = %archive.display(), error = %e, "Decompression failed");
        ExtractError::Decompress {
            path: archive.to_path_buf(),
            source: e,
        }
    })?;
    writer.flush().map_err(|e| ExtractError::io(dest, e))?;

    fs::remove_file(archive).map_err(|e| ExtractError::io(archive, e))?;
    tracing::debug!(
        archive = %archive.display(),
        dest = %dest.display(),
        bytes,
        "Decompressed archive"
    );
    Ok(bytes)
}
