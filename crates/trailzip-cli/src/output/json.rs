//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use trailzip_core::EntryMetadata;
use trailzip_core::trailer::TrailerReport;

pub struct JsonFormatter;

#[derive(Serialize)]
struct EntryOutput<'a> {
    name: &'a str,
    size: u64,
    compressed_size: u64,
    compression: String,
    supported: bool,
    is_dir: bool,
    crc32: u32,
}

impl<'a> From<&'a EntryMetadata> for EntryOutput<'a> {
    fn from(entry: &'a EntryMetadata) -> Self {
        Self {
            name: &entry.name,
            size: entry.size,
            compressed_size: entry.compressed_size,
            compression: entry.compression.to_string(),
            supported: entry.compression.is_supported(),
            is_dir: entry.is_dir,
            crc32: entry.crc32,
        }
    }
}

#[derive(Serialize)]
struct ListOutput<'a> {
    total_entries: usize,
    total_size: u64,
    entries: Vec<EntryOutput<'a>>,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn list_output(entries: &[EntryMetadata]) -> ListOutput<'_> {
        ListOutput {
            total_entries: entries.len(),
            total_size: entries.iter().map(|e| e.size).sum(),
            entries: entries.iter().map(EntryOutput::from).collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_trailer_report(&self, report: &TrailerReport) -> Result<()> {
        #[derive(Serialize)]
        struct InspectOutput {
            file: String,
            file_len: u64,
            host_len: u64,
            archive_offset: u64,
            archive_len: u64,
            stored_digest: String,
            computed_digest: String,
            digest_matches: bool,
        }

        let data = InspectOutput {
            file: report.path.display().to_string(),
            file_len: report.file_len,
            host_len: report.host_len(),
            archive_offset: report.region.offset,
            archive_len: report.region.len,
            stored_digest: hex::encode(report.footer.digest),
            computed_digest: hex::encode(report.computed_digest),
            digest_matches: report.digest_matches(),
        };

        let output = JsonOutput::success("inspect", data);
        Self::output(&output)
    }

    fn format_entries_short(&self, entries: &[EntryMetadata]) -> Result<()> {
        let output = JsonOutput::success("list", Self::list_output(entries));
        Self::output(&output)
    }

    fn format_entries_long(&self, entries: &[EntryMetadata], _human_readable: bool) -> Result<()> {
        self.format_entries_short(entries)
    }

    fn format_manifest(&self, manifest: &serde_json::Value) -> Result<()> {
        let output = JsonOutput::success("manifest", manifest);
        Self::output(&output)
    }

    fn format_error(&self, operation: &str, error: &anyhow::Error) {
        let output = JsonOutput::error(operation, format!("{error:#}"));
        let _ = Self::output(&output);
    }
}
