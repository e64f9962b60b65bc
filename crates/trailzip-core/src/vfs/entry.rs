//! Entry metadata exposed by archive filesystems.

use std::fmt;

/// Compression method of an archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    Stored,
    /// DEFLATE compression.
    Deflated,
    /// Any other method, by its archive-reported name.
    Other(String),
}

impl Compression {
    /// Returns `true` if entries with this method can be read.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        matches!(self, Self::Stored | Self::Deflated)
    }

    pub(crate) fn from_zip(method: zip::CompressionMethod) -> Self {
        match method {
            zip::CompressionMethod::Stored => Self::Stored,
            zip::CompressionMethod::Deflated => Self::Deflated,
            other => Self::Other(format!("{other:?}")),
        }
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stored => f.write_str("stored"),
            Self::Deflated => f.write_str("deflated"),
            Self::Other(name) => f.write_str(name),
        }
    }
}

/// Metadata for a single archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMetadata {
    /// Entry name as recorded in the central directory.
    pub name: String,

    /// Uncompressed size in bytes.
    pub size: u64,

    /// Compressed size in bytes.
    pub compressed_size: u64,

    /// Compression method.
    pub compression: Compression,

    /// Whether the entry is a directory.
    pub is_dir: bool,

    /// CRC-32 of the uncompressed content.
    pub crc32: u32,
}

impl EntryMetadata {
    /// Returns compressed size as a percentage of the uncompressed size.
    ///
    /// Returns `100.0` for empty entries.
    #[must_use]
    pub fn compression_percentage(&self) -> f64 {
        if self.size == 0 {
            100.0
        } else {
            (self.compressed_size as f64 / self.size as f64) * 100.0
        }
    }
}
