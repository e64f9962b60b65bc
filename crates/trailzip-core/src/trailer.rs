//! Trailer location and integrity verification.
//!
//! A host file carries its archive as a suffix followed by a fixed footer:
//!
//! ```text
//! [ host bytes                        ]
//! [ zip archive                       ]  archive_len bytes
//! [ archive_len: u64 little-endian    ]  8 bytes
//! [ SHA-512 of the zip archive bytes  ]  64 bytes
//! ```
//!
//! The digest covers exactly the archive bytes, not the length field and
//! not itself.

use std::fs::File;
use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::path::Path;
use std::path::PathBuf;

use sha2::Digest;
use sha2::Sha512;

use crate::FormatIssue;
use crate::ReadError;
use crate::Result;
use crate::io::SectionReader;

/// Size of the little-endian archive length field.
pub const LEN_FIELD_SIZE: usize = 8;

/// Size of the SHA-512 digest stored in the footer.
pub const DIGEST_SIZE: usize = 64;

/// Total size of the footer at the end of a host file.
pub const FOOTER_SIZE: usize = LEN_FIELD_SIZE + DIGEST_SIZE;

/// Decoded trailer footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    /// Length of the archive region in bytes.
    pub archive_len: u64,
    /// SHA-512 digest of the archive region.
    pub digest: [u8; DIGEST_SIZE],
}

/// Byte range of the archive inside the host file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveRegion {
    /// Absolute offset of the first archive byte.
    pub offset: u64,
    /// Length of the archive in bytes.
    pub len: u64,
}

impl Footer {
    /// Decodes a footer from its fixed-size byte representation.
    #[must_use]
    pub fn from_bytes(bytes: &[u8; FOOTER_SIZE]) -> Self {
        let (len_field, digest_field) = bytes.split_at(LEN_FIELD_SIZE);

        let mut len_bytes = [0u8; LEN_FIELD_SIZE];
        len_bytes.copy_from_slice(len_field);
        let mut digest = [0u8; DIGEST_SIZE];
        digest.copy_from_slice(digest_field);

        Self {
            archive_len: u64::from_le_bytes(len_bytes),
            digest,
        }
    }

    /// Computes the archive region for a host file of `file_len` bytes.
    ///
    /// # Errors
    ///
    /// Returns `ReadError::Format` if the region would start before the
    /// beginning of the file.
    ///
    /// # Examples
    ///
    /// ```
    /// use trailzip_core::trailer::Footer;
    ///
    /// let footer = Footer { archive_len: 100, digest: [0; 64] };
    /// let region = footer.region(1000)?;
    /// assert_eq!(region.offset, 1000 - 72 - 100);
    /// assert_eq!(region.len, 100);
    ///
    /// assert!(footer.region(150).is_err());
    /// # Ok::<(), trailzip_core::ReadError>(())
    /// ```
    pub fn region(&self, file_len: u64) -> Result<ArchiveRegion> {
        let out_of_bounds = || {
            ReadError::Format(FormatIssue::RegionOutOfBounds {
                archive_len: self.archive_len,
                file_len,
            })
        };

        let data_size = self
            .archive_len
            .checked_add(FOOTER_SIZE as u64)
            .ok_or_else(out_of_bounds)?;
        let offset = file_len.checked_sub(data_size).ok_or_else(out_of_bounds)?;

        Ok(ArchiveRegion {
            offset,
            len: self.archive_len,
        })
    }
}

/// Reads the footer from the last `FOOTER_SIZE` bytes of `reader`.
///
/// # Errors
///
/// Returns `ReadError::Format` if `file_len` is smaller than the footer, or
/// `ReadError::Io` if seeking or reading fails.
pub fn read_footer<R: Read + Seek>(reader: &mut R, file_len: u64) -> Result<Footer> {
    let footer_size = FOOTER_SIZE as u64;
    if file_len < footer_size {
        return Err(ReadError::Format(FormatIssue::FileTooSmall {
            len: file_len,
            min: footer_size,
        }));
    }

    reader.seek(SeekFrom::Start(file_len - footer_size))?;
    let mut bytes = [0u8; FOOTER_SIZE];
    reader.read_exact(&mut bytes)?;

    Ok(Footer::from_bytes(&bytes))
}

/// Streams `reader` to the end through SHA-512.
pub fn digest_region<R: Read>(reader: &mut R) -> Result<[u8; DIGEST_SIZE]> {
    let mut hasher = Sha512::new();
    io::copy(reader, &mut hasher)?;

    let mut digest = [0u8; DIGEST_SIZE];
    digest.copy_from_slice(&hasher.finalize());
    Ok(digest)
}

/// Locates and verifies the archive region of a host stream.
///
/// On success the returned section is rewound to the start of the archive
/// and ready to be handed to the zip parser.
///
/// # Errors
///
/// Returns `ReadError::Format` for a missing or inconsistent footer,
/// `ReadError::Checksum` if the region does not match the stored digest,
/// and `ReadError::Io` for read failures.
pub fn open_region<R: Read + Seek>(mut reader: R, file_len: u64) -> Result<SectionReader<R>> {
    let footer = read_footer(&mut reader, file_len)?;
    let region = footer.region(file_len)?;

    let mut section = SectionReader::new(reader, region.offset, region.len)?;
    let actual = digest_region(&mut section)?;
    if actual != footer.digest {
        return Err(ReadError::Checksum {
            expected: Box::new(footer.digest),
            actual: Box::new(actual),
        });
    }

    section.rewind()?;
    Ok(section)
}

/// Locates and verifies the archive region of an open host file.
pub(crate) fn open_file_region(file: File) -> Result<SectionReader<File>> {
    let file_len = file.metadata()?.len();
    open_region(file, file_len)
}

/// Diagnostic view of a host file's trailer.
#[derive(Debug, Clone)]
pub struct TrailerReport {
    /// Path of the inspected host file.
    pub path: PathBuf,
    /// Total length of the host file in bytes.
    pub file_len: u64,
    /// Decoded footer.
    pub footer: Footer,
    /// Location of the archive region.
    pub region: ArchiveRegion,
    /// Digest computed over the archive region.
    pub computed_digest: [u8; DIGEST_SIZE],
}

impl TrailerReport {
    /// Returns `true` if the computed digest equals the stored one.
    #[must_use]
    pub fn digest_matches(&self) -> bool {
        self.computed_digest == self.footer.digest
    }

    /// Returns the number of host bytes preceding the archive.
    #[must_use]
    pub fn host_len(&self) -> u64 {
        self.region.offset
    }
}

/// Inspects a host file's trailer without failing on digest mismatch.
///
/// Format problems (file too small, region out of bounds) are still
/// reported as errors since no region can be hashed.
///
/// # Examples
///
/// ```no_run
/// use trailzip_core::trailer::inspect;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = inspect("agent.bin")?;
/// println!(
///     "archive: {} bytes at offset {}, digest ok: {}",
///     report.region.len,
///     report.region.offset,
///     report.digest_matches()
/// );
/// # Ok(())
/// # }
/// ```
pub fn inspect<P: AsRef<Path>>(path: P) -> Result<TrailerReport> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let file_len = file.metadata()?.len();

    let footer = read_footer(&mut file, file_len)?;
    let region = footer.region(file_len)?;
    let mut section = SectionReader::new(file, region.offset, region.len)?;
    let computed_digest = digest_region(&mut section)?;

    Ok(TrailerReport {
        path: path.to_path_buf(),
        file_len,
        footer,
        region,
        computed_digest,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::frame;
    use std::io::Cursor;

    fn open_bytes(bytes: Vec<u8>) -> Result<SectionReader<Cursor<Vec<u8>>>> {
        let len = bytes.len() as u64;
        open_region(Cursor::new(bytes), len)
    }

    #[test]
    fn test_footer_size() {
        assert_eq!(FOOTER_SIZE, 72);
    }

    #[test]
    fn test_footer_from_bytes() {
        let mut bytes = [0u8; FOOTER_SIZE];
        bytes[..8].copy_from_slice(&300u64.to_le_bytes());
        bytes[8..].fill(0x5a);

        let footer = Footer::from_bytes(&bytes);
        assert_eq!(footer.archive_len, 300);
        assert_eq!(footer.digest, [0x5a; DIGEST_SIZE]);
    }

    #[test]
    fn test_region_exact_fit() {
        let footer = Footer {
            archive_len: 28,
            digest: [0; DIGEST_SIZE],
        };
        let region = footer.region(100).unwrap();
        assert_eq!(region, ArchiveRegion { offset: 0, len: 28 });
    }

    #[test]
    fn test_region_too_large() {
        let footer = Footer {
            archive_len: 29,
            digest: [0; DIGEST_SIZE],
        };
        let err = footer.region(100).unwrap_err();
        assert!(matches!(
            err,
            ReadError::Format(FormatIssue::RegionOutOfBounds {
                archive_len: 29,
                file_len: 100
            })
        ));
    }

    #[test]
    fn test_region_length_overflow() {
        let footer = Footer {
            archive_len: u64::MAX - 10,
            digest: [0; DIGEST_SIZE],
        };
        let err = footer.region(u64::MAX).unwrap_err();
        assert!(matches!(
            err,
            ReadError::Format(FormatIssue::RegionOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_read_footer_too_small() {
        let mut cursor = Cursor::new(vec![0u8; 71]);
        let err = read_footer(&mut cursor, 71).unwrap_err();
        assert!(matches!(
            err,
            ReadError::Format(FormatIssue::FileTooSmall { len: 71, min: 72 })
        ));
    }

    #[test]
    fn test_read_footer_at_tail() {
        let framed = frame(b"host", b"archive");
        let len = framed.len() as u64;
        let footer = read_footer(&mut Cursor::new(framed), len).unwrap();
        assert_eq!(footer.archive_len, 7);
        assert_eq!(footer.digest[..], Sha512::digest(b"archive")[..]);
    }

    #[test]
    fn test_open_region_valid() {
        let mut section = open_bytes(frame(b"\x7fELF host bytes", b"payload")).unwrap();
        assert_eq!(section.len(), 7);
        assert_eq!(section.start(), 15);

        let mut out = Vec::new();
        section.read_to_end(&mut out).unwrap();
        assert_eq!(out, b"payload");
    }

    #[test]
    fn test_open_region_empty_archive() {
        let mut section = open_bytes(frame(b"host", b"")).unwrap();
        assert!(section.is_empty());
        let mut out = Vec::new();
        assert_eq!(section.read_to_end(&mut out).unwrap(), 0);
    }

    #[test]
    fn test_open_region_checksum_mismatch() {
        let mut framed = frame(b"host", b"payload");
        framed[5] ^= 0x01;

        let err = open_bytes(framed).unwrap_err();
        assert!(matches!(err, ReadError::Checksum { .. }));
        assert!(err.is_integrity_failure());
    }

    #[test]
    fn test_open_region_digest_tampered() {
        let mut framed = frame(b"host", b"payload");
        let last = framed.len() - 1;
        framed[last] ^= 0x80;

        let err = open_bytes(framed).unwrap_err();
        assert!(matches!(err, ReadError::Checksum { .. }));
    }

    #[test]
    fn test_open_region_length_exceeds_file() {
        let mut framed = frame(b"host", b"payload");
        let len_at = framed.len() - FOOTER_SIZE;
        framed[len_at..len_at + 8].copy_from_slice(&1_000_000u64.to_le_bytes());

        let err = open_bytes(framed).unwrap_err();
        assert!(matches!(
            err,
            ReadError::Format(FormatIssue::RegionOutOfBounds { .. })
        ));
    }

    #[test]
    fn test_open_region_length_max() {
        let mut framed = frame(b"host", b"payload");
        let len_at = framed.len() - FOOTER_SIZE;
        framed[len_at..len_at + 8].copy_from_slice(&u64::MAX.to_le_bytes());

        let err = open_bytes(framed).unwrap_err();
        assert!(matches!(err, ReadError::Format(_)));
    }

    #[test]
    fn test_digest_region() {
        let digest = digest_region(&mut Cursor::new(b"abc")).unwrap();
        assert_eq!(digest[..], Sha512::digest(b"abc")[..]);
    }

    #[test]
    fn test_inspect_reports_mismatch() {
        let mut framed = frame(b"host", b"payload");
        framed[4] ^= 0xff;

        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), &framed).unwrap();

        let report = inspect(temp.path()).unwrap();
        assert_eq!(report.file_len, framed.len() as u64);
        assert_eq!(report.host_len(), 4);
        assert_eq!(report.region.len, 7);
        assert!(!report.digest_matches());
    }

    #[test]
    fn test_inspect_valid() {
        let framed = frame(b"host", b"payload");
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), &framed).unwrap();

        let report = inspect(temp.path()).unwrap();
        assert!(report.digest_matches());
        assert_eq!(report.path, temp.path());
    }

    #[test]
    fn test_inspect_missing_file() {
        let err = inspect("/nonexistent/trailzip/host.bin").unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
    }
}
