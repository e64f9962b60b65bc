//! Reader for zip archives embedded in the trailer of a host file.
//!
//! `trailzip-core` locates a zip archive appended to an otherwise ordinary
//! executable, verifies it against the SHA-512 digest stored in a fixed
//! 72-byte footer, mounts it as a read-only virtual filesystem, and decodes
//! the well-known `manifest.json` entry into caller-defined data.
//!
//! # Examples
//!
//! ```no_run
//! use trailzip_core::BootstrapManifest;
//! use trailzip_core::read_manifest;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest: BootstrapManifest = read_manifest(std::env::current_exe()?)?;
//! println!("brokers: {:?}", manifest.addresses);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod io;
pub mod manifest;
pub mod trailer;
pub mod vfs;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export main API types
pub use api::open_archive_fs;
pub use api::open_archive_fs_with;
pub use config::ReaderConfig;
pub use config::Verification;
pub use error::FormatIssue;
pub use error::ReadError;
pub use error::Result;
pub use manifest::BootstrapManifest;
pub use manifest::MANIFEST_NAME;
pub use manifest::decode_manifest;
pub use manifest::read_manifest;
pub use manifest::read_manifest_with;

// Re-export vfs module for easier access
pub use vfs::ArchiveFs;
pub use vfs::Compression;
pub use vfs::EntryMetadata;
pub use vfs::ZipEntry;
pub use vfs::ZipFs;
