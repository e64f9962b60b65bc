//! Error conversion utilities for CLI.
//!
//! Converts trailzip-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::io;
use std::path::Path;
use trailzip_core::ReadError;

/// Converts `ReadError` to user-friendly anyhow error with context
pub fn convert_read_error(err: ReadError, file: &Path) -> anyhow::Error {
    match err {
        ReadError::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {
            anyhow!("Cannot open '{}': {}", file.display(), io_err)
        }
        ReadError::Io(io_err) => {
            anyhow!("I/O error while reading '{}': {}", file.display(), io_err)
        }
        ReadError::Format(issue) => {
            anyhow!(
                "No embedded archive in '{}': {}\n\
                 HINT: The file carries no trailer or was truncated. Use --raw for plain zip files.",
                file.display(),
                issue
            )
        }
        err @ ReadError::Checksum { .. } => {
            anyhow!(
                "Integrity check failed for '{}': {}\n\
                 HINT: The embedded archive was modified after it was appended. Rebuild the host file.",
                file.display(),
                err
            )
        }
        ReadError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive in '{}': {}\n\
                 HINT: The embedded archive may be corrupted or malformed.",
                file.display(),
                reason
            )
        }
        ReadError::UnsupportedCompression { name, method } => {
            anyhow!(
                "Cannot read '{}' from '{}': unsupported compression {}\n\
                 HINT: Only stored and deflated entries can be read.",
                name,
                file.display(),
                method
            )
        }
        ReadError::EntryNotFound { name } => {
            anyhow!(
                "Entry '{}' not found in '{}'\n\
                 HINT: Run 'trailzip list' to see available entries.",
                name,
                file.display()
            )
        }
        ReadError::ManifestMissing => {
            anyhow!(
                "No {} in '{}'\n\
                 HINT: The embedded archive was built without a manifest.",
                trailzip_core::MANIFEST_NAME,
                file.display()
            )
        }
        ReadError::EntryTooLarge { name, size, max } => {
            anyhow!(
                "Entry '{}' in '{}' is too large: {} bytes (limit {})\n\
                 HINT: Use --max-size to raise the limit.",
                name,
                file.display(),
                size,
                max
            )
        }
        err @ ReadError::Decode(_) => anyhow::Error::from(err)
            .context(format!("Manifest in '{}' is not valid JSON", file.display())),
    }
}

/// Adds context to a generic error about host file operations
pub fn add_file_context<T>(result: Result<T, ReadError>, file: &Path) -> anyhow::Result<T> {
    result.map_err(|e| convert_read_error(e, file))
}
