//! Zip-backed archive filesystem.

use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;

use zip::ZipArchive;
use zip::read::ZipFile;
use zip::result::ZipError;

use crate::ReadError;
use crate::Result;
use crate::Verification;
use crate::io::SectionReader;
use crate::vfs::ArchiveFs;
use crate::vfs::Compression;
use crate::vfs::EntryMetadata;

/// Open, queryable view over an embedded zip archive.
///
/// Owns the host file for its whole lifetime. The central directory is
/// parsed once on construction; entries are decompressed lazily when
/// opened.
///
/// # Examples
///
/// ```no_run
/// use std::io::Read;
/// use trailzip_core::ArchiveFs;
/// use trailzip_core::open_archive_fs;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut fs = open_archive_fs("agent.bin")?;
/// for entry in fs.entries() {
///     println!("{} ({} bytes)", entry.name, entry.size);
/// }
///
/// let mut notes = String::new();
/// fs.open("notes.txt")?.read_to_string(&mut notes)?;
/// fs.close();
/// # Ok(())
/// # }
/// ```
pub struct ZipFs<R = SectionReader<File>> {
    archive: ZipArchive<R>,
    entries: Vec<EntryMetadata>,
    source: PathBuf,
    verification: Verification,
}

impl<R: Read + Seek> ZipFs<R> {
    /// Parses the zip central directory from `reader`.
    ///
    /// `source` and `verification` are recorded for diagnostics only.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::InvalidArchive` if the reader does not hold a
    /// well-formed zip archive, or `ReadError::Io` on read failures.
    pub fn new(reader: R, source: impl Into<PathBuf>, verification: Verification) -> Result<Self> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| archive_error(e, "failed to open ZIP archive"))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let file = archive
                .by_index_raw(i)
                .map_err(|e| archive_error(e, "failed to read ZIP entry"))?;
            entries.push(metadata_of(&file));
        }

        Ok(Self {
            archive,
            entries,
            source: source.into(),
            verification,
        })
    }

    /// Returns the path of the host file.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Returns the verification policy the archive was opened with.
    #[must_use]
    pub fn verification(&self) -> Verification {
        self.verification
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the archive has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns metadata for the entry named `name`.
    #[must_use]
    pub fn metadata(&self, name: &str) -> Option<&EntryMetadata> {
        self.archive
            .index_for_name(name)
            .and_then(|index| self.entries.get(index))
    }
}

impl<R: Read + Seek> ArchiveFs for ZipFs<R> {
    type Entry<'a>
        = ZipEntry<'a, R>
    where
        Self: 'a;

    fn open(&mut self, name: &str) -> Result<ZipEntry<'_, R>> {
        let index = self
            .archive
            .index_for_name(name)
            .ok_or_else(|| ReadError::EntryNotFound {
                name: name.to_string(),
            })?;
        let metadata = self
            .entries
            .get(index)
            .cloned()
            .ok_or_else(|| ReadError::EntryNotFound {
                name: name.to_string(),
            })?;

        if !metadata.compression.is_supported() {
            return Err(ReadError::UnsupportedCompression {
                name: metadata.name,
                method: metadata.compression.to_string(),
            });
        }

        // Supported methods can still be refused, e.g. for encrypted entries.
        let file = self
            .archive
            .by_index(index)
            .map_err(|e| archive_error(e, "failed to open ZIP entry"))?;

        Ok(ZipEntry {
            inner: file,
            metadata,
        })
    }

    fn entries(&self) -> &[EntryMetadata] {
        &self.entries
    }

    fn contains(&self, name: &str) -> bool {
        self.archive.index_for_name(name).is_some()
    }
}

impl<R> std::fmt::Debug for ZipFs<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipFs")
            .field("source", &self.source)
            .field("verification", &self.verification)
            .field("entries", &self.entries.len())
            .finish_non_exhaustive()
    }
}

/// Reader over one decompressed entry, borrowed from a [`ZipFs`].
pub struct ZipEntry<'a, R: Read> {
    inner: ZipFile<'a, R>,
    metadata: EntryMetadata,
}

impl<R: Read> ZipEntry<'_, R> {
    /// Returns the entry's metadata.
    #[must_use]
    pub fn metadata(&self) -> &EntryMetadata {
        &self.metadata
    }

    /// Returns the entry name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Returns the declared uncompressed size.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.metadata.size
    }
}

impl<R: Read> std::fmt::Debug for ZipEntry<'_, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZipEntry")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

impl<R: Read> Read for ZipEntry<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

fn metadata_of<R: Read>(file: &ZipFile<'_, R>) -> EntryMetadata {
    EntryMetadata {
        name: file.name().to_string(),
        size: file.size(),
        compressed_size: file.compressed_size(),
        compression: Compression::from_zip(file.compression()),
        is_dir: file.is_dir(),
        crc32: file.crc32(),
    }
}

fn archive_error(err: ZipError, what: &str) -> ReadError {
    match err {
        ZipError::Io(io_err) => ReadError::Io(io_err),
        other => ReadError::InvalidArchive(format!("{what}: {other}")),
    }
}
