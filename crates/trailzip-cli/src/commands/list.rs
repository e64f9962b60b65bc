//! List command implementation

use crate::cli::ListArgs;
use crate::cli::reader_config;
use crate::error::add_file_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use tracing::debug;
use trailzip_core::ArchiveFs;
use trailzip_core::open_archive_fs_with;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = reader_config(args.raw);
    debug!(file = %args.file.display(), policy = %config.verification, "opening archive");

    let fs = add_file_context(open_archive_fs_with(&args.file, &config), &args.file)?;
    debug!(entries = fs.len(), "archive opened");

    if args.long {
        formatter.format_entries_long(fs.entries(), args.human_readable)?;
    } else {
        formatter.format_entries_short(fs.entries())?;
    }

    fs.close();
    Ok(())
}
