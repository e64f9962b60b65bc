//! Capability trait for embedded archive filesystems.

use std::io::Read;

use crate::Result;
use crate::vfs::EntryMetadata;

/// Read-only filesystem view over an archive.
///
/// Entry readers borrow the filesystem mutably, so they cannot outlive it
/// and at most one entry is open at a time. Dropping the filesystem
/// releases the underlying file; [`ArchiveFs::close`] does the same
/// explicitly.
pub trait ArchiveFs {
    /// Sequential reader over one entry's decompressed content.
    type Entry<'a>: Read
    where
        Self: 'a;

    /// Opens the entry named `name`.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::EntryNotFound` if no entry has that exact name,
    /// `ReadError::UnsupportedCompression` if its method cannot be decoded,
    /// or `ReadError::InvalidArchive` if its header is malformed.
    fn open(&mut self, name: &str) -> Result<Self::Entry<'_>>;

    /// Returns metadata for every entry, in central directory order.
    fn entries(&self) -> &[EntryMetadata];

    /// Returns `true` if an entry named `name` exists.
    fn contains(&self, name: &str) -> bool {
        self.entries().iter().any(|entry| entry.name == name)
    }

    /// Releases the filesystem and its underlying file.
    fn close(self)
    where
        Self: Sized,
    {
        drop(self);
    }
}
