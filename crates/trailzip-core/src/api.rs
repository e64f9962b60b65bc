//! High-level public API for opening embedded archives.

use std::fs::File;
use std::path::Path;

use crate::ReaderConfig;
use crate::Result;
use crate::Verification;
use crate::io::SectionReader;
use crate::trailer;
use crate::vfs::ZipFs;

/// Opens the archive embedded in a host file's trailer.
///
/// The trailer footer is decoded, the archive region is hashed with SHA-512
/// and compared against the stored digest, and only then is the zip central
/// directory parsed.
///
/// # Errors
///
/// Returns an error if:
/// - The host file cannot be opened or read
/// - The file is too small or its footer points outside the file
/// - The archive digest does not match
/// - The archive region is not a well-formed zip archive
///
/// # Examples
///
/// ```no_run
/// use trailzip_core::ArchiveFs;
/// use trailzip_core::open_archive_fs;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fs = open_archive_fs(std::env::current_exe()?)?;
/// println!("{} embedded entries", fs.entries().len());
/// # Ok(())
/// # }
/// ```
pub fn open_archive_fs<P: AsRef<Path>>(path: P) -> Result<ZipFs> {
    open_archive_fs_with(path, &ReaderConfig::default())
}

/// Opens an embedded archive using the verification policy in `config`.
///
/// With [`Verification::Raw`] the whole file is parsed as a plain zip
/// archive and no integrity check is performed.
///
/// # Errors
///
/// See [`open_archive_fs`]. Under the raw policy only I/O and archive
/// errors are possible.
pub fn open_archive_fs_with<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<ZipFs> {
    let path = path.as_ref();
    let file = File::open(path)?;

    let reader = match config.verification {
        Verification::Trailer => trailer::open_file_region(file)?,
        Verification::Raw => {
            let len = file.metadata()?.len();
            SectionReader::new(file, 0, len)?
        }
    };

    ZipFs::new(reader, path, config.verification)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ArchiveFs;
    use crate::ReadError;
    use crate::test_utils::create_test_zip;
    use crate::test_utils::frame;
    use std::io::Read;
    use tempfile::NamedTempFile;

    fn write_temp(bytes: &[u8]) -> NamedTempFile {
        let temp = NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), bytes).unwrap();
        temp
    }

    #[test]
    fn test_open_framed_archive() {
        let archive = create_test_zip(&[("hello.txt", b"hi".as_slice())]);
        let temp = write_temp(&frame(b"\x7fELF\x02\x01\x01", &archive));

        let mut fs = open_archive_fs(temp.path()).unwrap();
        assert_eq!(fs.verification(), Verification::Trailer);
        assert_eq!(fs.source(), temp.path());

        let mut out = String::new();
        fs.open("hello.txt")
            .unwrap()
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "hi");
        fs.close();
    }

    #[test]
    fn test_open_raw_archive() {
        let archive = create_test_zip(&[("hello.txt", b"hi".as_slice())]);
        let temp = write_temp(&archive);

        let fs = open_archive_fs_with(temp.path(), &ReaderConfig::raw()).unwrap();
        assert_eq!(fs.verification(), Verification::Raw);
        assert!(fs.contains("hello.txt"));
    }

    #[test]
    fn test_trailer_policy_rejects_plain_zip() {
        let archive = create_test_zip(&[("hello.txt", b"hi".as_slice())]);
        let temp = write_temp(&archive);

        let err = open_archive_fs(temp.path()).unwrap_err();
        assert!(err.is_integrity_failure(), "unexpected error: {err}");
    }

    #[test]
    fn test_framed_non_zip_payload() {
        let temp = write_temp(&frame(b"host", b"this is not a zip archive"));
        let err = open_archive_fs(temp.path()).unwrap_err();
        assert!(matches!(err, ReadError::InvalidArchive(_)));
    }

    #[test]
    fn test_open_missing_file() {
        let err = open_archive_fs("/nonexistent/trailzip/agent").unwrap_err();
        assert!(matches!(err, ReadError::Io(_)));
    }

    #[test]
    fn test_raw_policy_on_empty_file() {
        let temp = write_temp(b"");
        let err = open_archive_fs_with(temp.path(), &ReaderConfig::raw()).unwrap_err();
        assert!(matches!(
            err,
            ReadError::InvalidArchive(_) | ReadError::Io(_)
        ));
    }
}
