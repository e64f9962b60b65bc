//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use trailzip_core::EntryMetadata;
use trailzip_core::trailer::TrailerReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    /// Binary units, capped at GB.
    fn format_size(bytes: u64) -> String {
        const UNITS: [(u64, &str); 3] = [(1 << 30, "GB"), (1 << 20, "MB"), (1 << 10, "KB")];

        UNITS
            .iter()
            .find(|(scale, _)| bytes >= *scale)
            .map_or_else(
                || format!("{bytes} B"),
                |(scale, unit)| format!("{:.1} {unit}", bytes as f64 / *scale as f64),
            )
    }

    /// Groups digits in threes: `1234567` becomes `1,234,567`.
    fn format_number(n: usize) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }

        out
    }

    /// Full digest in verbose mode, otherwise the first 16 hex digits.
    fn format_digest(&self, digest: &[u8]) -> String {
        let full = hex::encode(digest);
        if self.verbose {
            full
        } else {
            format!("{}...", &full[..16])
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_trailer_report(&self, report: &TrailerReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let matches = report.digest_matches();
        let header = match (matches, self.use_colors) {
            (true, true) => format!("{} Archive digest verified", style("✓").green().bold()),
            (false, true) => format!("{} Archive digest mismatch", style("✗").red().bold()),
            (true, false) => "Archive digest verified".to_string(),
            (false, false) => "Archive digest mismatch".to_string(),
        };
        let _ = self.term.write_line(&header);

        let _ = self
            .term
            .write_line(&format!("  File:           {}", report.path.display()));
        let _ = self.term.write_line(&format!(
            "  File size:      {}",
            Self::format_size(report.file_len)
        ));
        let _ = self.term.write_line(&format!(
            "  Host bytes:     {}",
            Self::format_size(report.host_len())
        ));
        let _ = self.term.write_line(&format!(
            "  Archive:        {} at offset {}",
            Self::format_size(report.region.len),
            report.region.offset
        ));
        let _ = self.term.write_line(&format!(
            "  Stored digest:  {}",
            self.format_digest(&report.footer.digest)
        ));

        if self.verbose || !matches {
            let _ = self.term.write_line(&format!(
                "  Actual digest:  {}",
                self.format_digest(&report.computed_digest)
            ));
        }

        Ok(())
    }

    fn format_entries_short(&self, entries: &[EntryMetadata]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for entry in entries {
            let _ = self.term.write_line(&entry.name);
        }

        Ok(())
    }

    fn format_entries_long(&self, entries: &[EntryMetadata], human_readable: bool) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let size_str = |bytes: u64| {
            if human_readable {
                Self::format_size(bytes)
            } else {
                bytes.to_string()
            }
        };

        for entry in entries {
            let type_char = if entry.is_dir { "d" } else { "-" };
            let method = if entry.compression.is_supported() || !self.use_colors {
                entry.compression.to_string()
            } else {
                style(entry.compression.to_string()).yellow().to_string()
            };

            let _ = self.term.write_line(&format!(
                "{type_char} {method:<9} {:>10} {:>10} {:>6.1}%  {:08x}  {}",
                size_str(entry.size),
                size_str(entry.compressed_size),
                entry.compression_percentage(),
                entry.crc32,
                entry.name
            ));
        }

        let total_size: u64 = entries.iter().map(|e| e.size).sum();
        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "Total: {} entries, {}",
            Self::format_number(entries.len()),
            Self::format_size(total_size)
        ));

        Ok(())
    }

    fn format_manifest(&self, manifest: &serde_json::Value) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let _ = self.term.write_line(&serde_json::to_string_pretty(manifest)?);
        Ok(())
    }

    fn format_error(&self, _operation: &str, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}
