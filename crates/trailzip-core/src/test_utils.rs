//! Test utilities for building host files with embedded archives.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;

use sha2::Digest;
use sha2::Sha512;
use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

/// Appends `archive` and its trailer footer to `host`.
#[must_use]
pub fn frame(host: &[u8], archive: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(host.len() + archive.len() + 72);
    out.extend_from_slice(host);
    out.extend_from_slice(archive);
    out.extend_from_slice(&(archive.len() as u64).to_le_bytes());
    out.extend_from_slice(&Sha512::digest(archive));
    out
}

/// Creates an in-memory ZIP archive of stored entries.
#[must_use]
pub fn create_test_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    entries
        .iter()
        .fold(ZipTestBuilder::new(), |builder, (name, data)| {
            builder.add_file(name, data)
        })
        .build()
}

/// Builder for ZIP test archives with mixed compression methods.
pub struct ZipTestBuilder {
    writer: ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            writer: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a stored (uncompressed) file.
    #[must_use]
    pub fn add_file(self, name: &str, data: &[u8]) -> Self {
        self.add_with_method(name, data, zip::CompressionMethod::Stored)
    }

    /// Adds a deflate-compressed file.
    #[must_use]
    pub fn add_deflated(self, name: &str, data: &[u8]) -> Self {
        self.add_with_method(name, data, zip::CompressionMethod::Deflated)
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn add_directory(mut self, name: &str) -> Self {
        self.writer
            .add_directory(name, SimpleFileOptions::default())
            .unwrap();
        self
    }

    fn add_with_method(mut self, name: &str, data: &[u8], method: zip::CompressionMethod) -> Self {
        let options = SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(0o644);
        self.writer.start_file(name, options).unwrap();
        self.writer.write_all(data).unwrap();
        self
    }

    /// Finishes the archive and returns its bytes.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.writer.finish().unwrap().into_inner()
    }
}

const LOCAL_SIG: &[u8] = b"PK\x03\x04";
const CENTRAL_SIG: &[u8] = b"PK\x01\x02";

fn signature_offsets(sig: &[u8], data: &[u8]) -> Vec<usize> {
    data.windows(4)
        .enumerate()
        .filter(|(_, w)| *w == sig)
        .map(|(i, _)| i)
        .collect()
}

/// Applies `patch` to the field at `local_at` in every local header and at
/// `central_at` in every central directory header.
fn patch_headers(
    mut archive: Vec<u8>,
    local_at: usize,
    central_at: usize,
    patch: impl Fn(&mut [u8]),
) -> Vec<u8> {
    for pos in signature_offsets(LOCAL_SIG, &archive) {
        patch(&mut archive[pos + local_at..]);
    }
    for pos in signature_offsets(CENTRAL_SIG, &archive) {
        patch(&mut archive[pos + central_at..]);
    }
    archive
}

/// Rewrites the compression method of every entry in a single-method
/// archive, in both local and central directory headers.
#[must_use]
pub fn patch_compression_method(archive: Vec<u8>, method: u16) -> Vec<u8> {
    patch_headers(archive, 8, 10, |field| {
        field[..2].copy_from_slice(&method.to_le_bytes());
    })
}

/// Sets the "encrypted" general purpose flag on every entry.
#[must_use]
pub fn set_encrypted_flag(archive: Vec<u8>) -> Vec<u8> {
    patch_headers(archive, 6, 8, |field| field[0] |= 0x01)
}

/// Flips one bit of every entry's recorded CRC-32 so content no longer
/// matches its headers.
#[must_use]
pub fn corrupt_crc32(archive: Vec<u8>) -> Vec<u8> {
    patch_headers(archive, 14, 16, |field| field[0] ^= 0x01)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let framed = frame(b"host", b"zip");
        assert_eq!(framed.len(), 4 + 3 + 72);
        assert_eq!(&framed[..7], b"hostzip");
        assert_eq!(&framed[7..15], &3u64.to_le_bytes());
    }

    #[test]
    fn test_create_test_zip_signature() {
        let data = create_test_zip(&[("a.txt", b"a".as_slice())]);
        assert_eq!(&data[..4], b"PK\x03\x04");
    }
}
