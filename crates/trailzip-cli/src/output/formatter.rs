//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use trailzip_core::EntryMetadata;
use trailzip_core::trailer::TrailerReport;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format trailer inspection result
    fn format_trailer_report(&self, report: &TrailerReport) -> Result<()>;

    /// Format entry listing (names only)
    fn format_entries_short(&self, entries: &[EntryMetadata]) -> Result<()>;

    /// Format detailed entry listing
    fn format_entries_long(&self, entries: &[EntryMetadata], human_readable: bool) -> Result<()>;

    /// Format decoded manifest
    fn format_manifest(&self, manifest: &serde_json::Value) -> Result<()>;

    /// Format error message
    fn format_error(&self, operation: &str, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
