//! Blocking HTTP download of a yearly export.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use crate::error::{ExtractError, Result};

/// User agent string for download requests.
const USER_AGENT_VALUE: &str = concat!("dvf-etl/", env!("CARGO_PKG_VERSION"));

/// Download `url` into `dest`, streaming the body to disk.
///
/// Returns the number of bytes written. An existing `dest` is replaced.
pub fn download(url: &str, dest: &Path) -> Result<u64> {
    tracing::info!(url, dest = %dest.display(), "Starting download");
    let start = Instant::now();

    let client = reqwest::blocking::Client::builder()
        .user_agent(USER_AGENT_VALUE)
        .build()
        .map_err(|e| network(url, &e))?;
    let mut response = client.get(url).send().map_err(|e| network(url, &e))?;

    let status = response.status();
    if !status.is_success() {
        tracing::error!(url, status = status.as_u16(), "Download rejected");
        return Err(ExtractError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let file = File::create(dest).map_err(|e| ExtractError::io(dest, e))?;
    let mut writer = BufWriter::new(file);
    let bytes = response
        .copy_to(&mut writer)
        .map_err(|e| network(url, &e))?;
    writer.flush().map_err(|e| ExtractError::io(dest, e))?;

    tracing::info!(
        url,
        size = %format_bytes(bytes),
        duration_ms = start.elapsed().as_millis(),
        "Download complete"
    );
    Ok(bytes)
}

fn network(url: &str, err: &reqwest::Error) -> ExtractError {
    tracing::error!(url, error = %err, "Download failed");
    ExtractError::Network {
        url: url.to_string(),
        message: err.to_string(),
    }
}

/// Formats a byte count in human-readable form.
pub(crate) fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(52_428_800), "50.0 MB");
    }

    #[test]
    fn unreachable_host_is_network_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let dest = dir.path().join("full.csv.gz");
        let err = download("http://127.0.0.1:9/full.csv.gz", &dest).unwrap_err();
        assert!(matches!(err, ExtractError::Network { .. }));
        assert!(!dest.exists());
    }
}
