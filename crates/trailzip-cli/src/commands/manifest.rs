//! Manifest command implementation

use crate::cli::ManifestArgs;
use crate::error::add_file_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use tracing::debug;
use trailzip_core::read_manifest_with;

pub fn execute(args: &ManifestArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = args.config();
    debug!(
        file = %args.file.display(),
        policy = %config.verification,
        max_size = config.max_manifest_size,
        "reading manifest"
    );

    let manifest: serde_json::Value =
        add_file_context(read_manifest_with(&args.file, &config), &args.file)?;

    formatter.format_manifest(&manifest)
}
