//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;
use trailzip_core::ReaderConfig;

#[derive(Parser)]
#[command(name = "trailzip")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show trailer layout and verify the archive digest
    Inspect(InspectArgs),
    /// List entries of the embedded archive
    List(ListArgs),
    /// Print the embedded manifest as JSON
    Manifest(ManifestArgs),
    /// Write one embedded entry to stdout
    Cat(CatArgs),
    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Commands {
    /// Operation name used in structured output.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Inspect(_) => "inspect",
            Self::List(_) => "list",
            Self::Manifest(_) => "manifest",
            Self::Cat(_) => "cat",
            Self::Completion { .. } => "completion",
        }
    }
}

#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the host file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Path to the host file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Treat the whole file as a plain zip archive (no integrity check)
    #[arg(long)]
    pub raw: bool,

    /// Show detailed entry information
    #[arg(short, long)]
    pub long: bool,

    /// Show sizes in human-readable format
    #[arg(short = 'H', long)]
    pub human_readable: bool,
}

#[derive(clap::Args)]
pub struct ManifestArgs {
    /// Path to the host file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Treat the whole file as a plain zip archive (no integrity check)
    #[arg(long)]
    pub raw: bool,

    /// Maximum manifest size in bytes (suffixes K, M, G, T accepted)
    #[arg(long, value_parser = parse_byte_size)]
    pub max_size: Option<u64>,
}

#[derive(clap::Args)]
pub struct CatArgs {
    /// Path to the host file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Entry name inside the archive
    #[arg(value_name = "ENTRY")]
    pub entry: String,

    /// Treat the whole file as a plain zip archive (no integrity check)
    #[arg(long)]
    pub raw: bool,
}

/// Builds the reader configuration for the `--raw` flag.
pub fn reader_config(raw: bool) -> ReaderConfig {
    if raw {
        ReaderConfig::raw()
    } else {
        ReaderConfig::default()
    }
}

impl ManifestArgs {
    pub fn config(&self) -> ReaderConfig {
        let config = reader_config(self.raw);
        match self.max_size {
            Some(max) => config.with_max_manifest_size(max),
            None => config,
        }
    }
}

/// Parses a byte count with an optional binary suffix: `K`, `M`, `G` or `T`.
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    let (digits, shift) = match s.char_indices().last() {
        None => return Err("empty byte size".to_string()),
        Some((i, 'K')) => (&s[..i], 10),
        Some((i, 'M')) => (&s[..i], 20),
        Some((i, 'G')) => (&s[..i], 30),
        Some((i, 'T')) => (&s[..i], 40),
        Some(_) => (s, 0),
    };

    let n: u64 = digits
        .parse()
        .map_err(|_| format!("invalid byte size: {s}"))?;
    n.checked_mul(1_u64 << shift)
        .ok_or_else(|| format!("byte size overflow: {s}"))
}
