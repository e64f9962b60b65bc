//! Error types for trailer location, verification, and manifest decoding.

use thiserror::Error;

/// Result type alias using `ReadError`.
pub type Result<T> = std::result::Result<T, ReadError>;

/// Describes why a host file does not carry a well-formed trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatIssue {
    /// The file is shorter than the fixed footer.
    FileTooSmall {
        /// Length of the host file in bytes.
        len: u64,
        /// Minimum length required to hold a footer.
        min: u64,
    },
    /// The footer's archive length points outside the file.
    RegionOutOfBounds {
        /// Archive length stored in the footer.
        archive_len: u64,
        /// Length of the host file in bytes.
        file_len: u64,
    },
}

impl std::fmt::Display for FormatIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileTooSmall { len, min } => {
                write!(f, "file too small for trailer ({len} < {min} bytes)")
            }
            Self::RegionOutOfBounds {
                archive_len,
                file_len,
            } => {
                write!(
                    f,
                    "archive region out of bounds (archive length {archive_len}, file length {file_len})"
                )
            }
        }
    }
}

/// Errors that can occur while reading an embedded archive.
#[derive(Error, Debug)]
pub enum ReadError {
    /// I/O operation on the host file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The host file was not produced by the expected embedding step.
    #[error("invalid trailer: {0}")]
    Format(FormatIssue),

    /// The archive region does not hash to the digest stored in the footer.
    #[error("checksum mismatch: expected {}, got {}", short_hex(.expected), short_hex(.actual))]
    Checksum {
        /// Digest stored in the footer.
        expected: Box<[u8]>,
        /// Digest computed over the archive region.
        actual: Box<[u8]>,
    },

    /// The archive region is not a well-formed zip archive.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// An entry uses a compression method the reader cannot decode.
    #[error("unsupported compression for {name}: {method}")]
    UnsupportedCompression {
        /// Entry name.
        name: String,
        /// Compression method reported by the archive.
        method: String,
    },

    /// The requested entry does not exist in the archive.
    #[error("entry not found: {name}")]
    EntryNotFound {
        /// Entry name that was requested.
        name: String,
    },

    /// The archive carries no manifest entry.
    #[error("manifest missing: archive has no {}", crate::MANIFEST_NAME)]
    ManifestMissing,

    /// An entry is larger than the configured limit.
    #[error("entry too large: {name} ({size} > {max} bytes)")]
    EntryTooLarge {
        /// Entry name.
        name: String,
        /// Declared uncompressed size in bytes.
        size: u64,
        /// Maximum allowed size in bytes.
        max: u64,
    },

    /// The manifest bytes could not be decoded into the requested shape.
    #[error("manifest decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ReadError {
    /// Returns `true` if the host file's trailer is malformed or its digest
    /// does not match.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailzip_core::FormatIssue;
    /// use trailzip_core::ReadError;
    ///
    /// let err = ReadError::Format(FormatIssue::FileTooSmall { len: 10, min: 72 });
    /// assert!(err.is_integrity_failure());
    ///
    /// let err = ReadError::ManifestMissing;
    /// assert!(!err.is_integrity_failure());
    /// ```
    #[must_use]
    pub const fn is_integrity_failure(&self) -> bool {
        matches!(self, Self::Format(_) | Self::Checksum { .. })
    }

    /// Returns `true` if a named entry (or the manifest) was absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::EntryNotFound { .. } | Self::ManifestMissing)
    }

    /// Returns a context string for this error, if available.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailzip_core::ReadError;
    ///
    /// let err = ReadError::InvalidArchive("bad central directory".to_string());
    /// assert_eq!(err.context(), Some("bad central directory"));
    ///
    /// let err = ReadError::ManifestMissing;
    /// assert_eq!(err.context(), None);
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::InvalidArchive(msg) => Some(msg),
            Self::EntryNotFound { name }
            | Self::UnsupportedCompression { name, .. }
            | Self::EntryTooLarge { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Returns the format issue, if this is a format error.
    #[must_use]
    pub const fn format_issue(&self) -> Option<&FormatIssue> {
        match self {
            Self::Format(issue) => Some(issue),
            _ => None,
        }
    }
}

/// First eight bytes of a digest in hex.
fn short_hex(digest: &[u8]) -> String {
    let mut out = hex::encode(&digest[..digest.len().min(8)]);
    if digest.len() > 8 {
        out.push_str("...");
    }
    out
}
