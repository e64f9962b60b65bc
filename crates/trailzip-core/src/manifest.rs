//! Manifest decoding.
//!
//! The manifest is the single well-known JSON entry inside an embedded
//! archive. Its schema is agreed out of band between the embedding side and
//! the consumer; this module only performs a generic structured decode into
//! whatever shape the caller asks for.

use std::io;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::ArchiveFs;
use crate::ReadError;
use crate::ReaderConfig;
use crate::Result;
use crate::open_archive_fs_with;

/// Name of the manifest entry inside the archive.
pub const MANIFEST_NAME: &str = "manifest.json";

/// Reads and decodes the manifest embedded in a host file's trailer.
///
/// # Errors
///
/// Returns every error of [`crate::open_archive_fs`], plus
/// `ReadError::ManifestMissing` if the archive has no manifest,
/// `ReadError::EntryTooLarge` if it exceeds the default size limit, and
/// `ReadError::Decode` if it is not valid JSON for `T`.
///
/// # Examples
///
/// ```no_run
/// use serde::Deserialize;
/// use trailzip_core::read_manifest;
///
/// #[derive(Deserialize)]
/// struct Bootstrap {
///     addresses: Vec<String>,
///     semver: String,
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let boot: Bootstrap = read_manifest(std::env::current_exe()?)?;
/// println!("{} brokers, version {}", boot.addresses.len(), boot.semver);
/// # Ok(())
/// # }
/// ```
pub fn read_manifest<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    read_manifest_with(path, &ReaderConfig::default())
}

/// Reads and decodes the manifest using the policy and limits in `config`.
///
/// The filesystem handle and the entry reader are released before this
/// function returns, on success and on every error path.
pub fn read_manifest_with<T, P>(path: P, config: &ReaderConfig) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let mut fs = open_archive_fs_with(path, config)?;
    decode_manifest(&mut fs, config.max_manifest_size)
}

/// Decodes the manifest entry of an already opened filesystem.
///
/// # Errors
///
/// Returns `ReadError::ManifestMissing`, `ReadError::EntryTooLarge`, or
/// `ReadError::Decode` as described on [`read_manifest`].
pub fn decode_manifest<F, T>(fs: &mut F, max_size: u64) -> Result<T>
where
    F: ArchiveFs,
    T: DeserializeOwned,
{
    let declared = fs
        .entries()
        .iter()
        .find(|entry| entry.name == MANIFEST_NAME)
        .map(|entry| entry.size);
    if let Some(size) = declared
        && size > max_size
    {
        return Err(ReadError::EntryTooLarge {
            name: MANIFEST_NAME.to_string(),
            size,
            max: max_size,
        });
    }

    // Header sizes can lie; never read past the limit either way.
    let entry = fs.open(MANIFEST_NAME).map_err(|e| match e {
        ReadError::EntryNotFound { .. } => ReadError::ManifestMissing,
        other => other,
    })?;

    serde_json::from_reader(entry.take(max_size)).map_err(decode_error)
}

/// Keeps entry read failures (bad CRC, broken deflate stream) apart from
/// malformed JSON.
fn decode_error(err: serde_json::Error) -> ReadError {
    if !err.is_io() {
        return ReadError::Decode(err);
    }

    let io_err = io::Error::from(err);
    if io_err.kind() == io::ErrorKind::InvalidData {
        ReadError::InvalidArchive(format!("corrupt {MANIFEST_NAME}: {io_err}"))
    } else {
        ReadError::Io(io_err)
    }
}

/// Bootstrap configuration agreed with the embedding side.
///
/// Every field defaults when absent so older manifests keep decoding.
/// Callers needing extra fields should decode into their own type instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapManifest {
    /// Broker addresses the agent connects to.
    pub addresses: Vec<String>,
    /// Version the agent reports.
    pub semver: String,
    /// Start silently; only honoured when registering a new node.
    pub unload: bool,
    /// Opt into unstable releases.
    pub unstable: bool,
    /// Free-form deployment tag.
    pub customized: String,
}
