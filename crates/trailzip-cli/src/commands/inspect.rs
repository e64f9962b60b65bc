//! Inspect command implementation

use crate::cli::InspectArgs;
use crate::error::add_file_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use anyhow::bail;
use tracing::debug;
use trailzip_core::trailer;

pub fn execute(args: &InspectArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    debug!(file = %args.file.display(), "inspecting trailer");
    let report = add_file_context(trailer::inspect(&args.file), &args.file)?;
    debug!(
        offset = report.region.offset,
        len = report.region.len,
        "located archive region"
    );

    formatter.format_trailer_report(&report)?;

    // Exit non-zero so scripts can gate on the digest
    if !report.digest_matches() {
        bail!(
            "Integrity check failed for '{}': stored digest does not match archive contents",
            args.file.display()
        );
    }

    Ok(())
}
