//! Cat command implementation
//!
//! Entry bytes go to stdout unchanged, so this command ignores `--json`.

use crate::cli::CatArgs;
use crate::cli::reader_config;
use crate::error::add_file_context;
use anyhow::Context;
use anyhow::Result;
use std::io;
use std::io::Write;
use tracing::debug;
use trailzip_core::ArchiveFs;
use trailzip_core::open_archive_fs_with;

pub fn execute(args: &CatArgs) -> Result<()> {
    let config = reader_config(args.raw);
    let mut fs = add_file_context(open_archive_fs_with(&args.file, &config), &args.file)?;

    let mut entry = add_file_context(fs.open(&args.entry), &args.file)?;
    debug!(entry = %args.entry, size = entry.size(), "copying entry");

    let mut stdout = io::stdout().lock();
    io::copy(&mut entry, &mut stdout).with_context(|| {
        format!(
            "Failed to read '{}' from '{}'",
            args.entry,
            args.file.display()
        )
    })?;
    stdout.flush()?;

    Ok(())
}
