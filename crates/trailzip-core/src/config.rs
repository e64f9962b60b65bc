//! Reader configuration.

/// How the archive is located inside the host file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verification {
    /// Locate the archive through the 72-byte trailer and check its SHA-512
    /// digest before parsing.
    #[default]
    Trailer,

    /// Treat the whole file as a plain zip archive. No framing, no integrity
    /// check: tampering with the file goes undetected.
    Raw,
}

impl Verification {
    /// Returns a short name for display.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trailer => "trailer",
            Self::Raw => "raw",
        }
    }
}

impl std::fmt::Display for Verification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for opening embedded archives.
///
/// # Examples
///
/// ```
/// use trailzip_core::ReaderConfig;
/// use trailzip_core::Verification;
///
/// // Verified trailer, 1 MiB manifest limit
/// let config = ReaderConfig::default();
/// assert_eq!(config.verification, Verification::Trailer);
///
/// // Plain zip file, larger manifest
/// let custom = ReaderConfig::raw().with_max_manifest_size(8 * 1024 * 1024);
/// assert_eq!(custom.verification, Verification::Raw);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Verification policy used when opening the host file.
    pub verification: Verification,

    /// Maximum uncompressed size of the manifest entry in bytes.
    pub max_manifest_size: u64,
}

impl Default for ReaderConfig {
    /// Creates a `ReaderConfig` with the trailer policy and a 1 MiB manifest
    /// limit.
    fn default() -> Self {
        Self {
            verification: Verification::Trailer,
            max_manifest_size: 1024 * 1024, // 1 MiB
        }
    }
}

impl ReaderConfig {
    /// Creates a configuration that opens the file as a plain zip archive.
    #[must_use]
    pub fn raw() -> Self {
        Self {
            verification: Verification::Raw,
            ..Default::default()
        }
    }

    /// Sets the verification policy.
    #[must_use]
    pub fn with_verification(mut self, verification: Verification) -> Self {
        self.verification = verification;
        self
    }

    /// Sets the manifest size limit.
    #[must_use]
    pub fn with_max_manifest_size(mut self, max: u64) -> Self {
        self.max_manifest_size = max;
        self
    }
}
