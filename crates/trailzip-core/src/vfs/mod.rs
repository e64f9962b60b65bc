//! Read-only virtual filesystem over an embedded archive.
//!
//! Callers work against the [`ArchiveFs`] capability trait and the
//! [`EntryMetadata`] listing type; the zip backend stays an implementation
//! detail of [`ZipFs`].

pub mod entry;
pub mod traits;
pub mod zipfs;

pub use entry::Compression;
pub use entry::EntryMetadata;
pub use traits::ArchiveFs;
pub use zipfs::ZipEntry;
pub use zipfs::ZipFs;
