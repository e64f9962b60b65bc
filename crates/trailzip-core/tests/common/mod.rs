//! Shared helpers for building host files in integration tests.

#![allow(clippy::unwrap_used, dead_code)]

use std::io::Cursor;
use std::io::Write;
use std::path::PathBuf;

use sha2::Digest;
use sha2::Sha512;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

/// Footer size: little-endian length plus SHA-512 digest.
pub const FOOTER_SIZE: usize = 72;

/// Sample manifest used across tests.
pub const SAMPLE_MANIFEST: &str =
    r#"{"addresses":["127.0.0.1:8082"],"semver":"1.0.0-alpha","unload":false}"#;

/// Fake executable prefix.
pub const HOST_BYTES: &[u8] = b"\x7fELF\x02\x01\x01\x00fake executable body for trailer tests";

/// Builds a zip archive; `deflate` selects the compression method.
pub fn build_zip(entries: &[(&str, &[u8])], deflate: bool) -> Vec<u8> {
    let method = if deflate {
        zip::CompressionMethod::Deflated
    } else {
        zip::CompressionMethod::Stored
    };
    let options = SimpleFileOptions::default().compression_method(method);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Flips a bit of every recorded CRC-32 in local and central headers.
pub fn corrupt_crc32(mut archive: Vec<u8>) -> Vec<u8> {
    for (sig, crc_at) in [(b"PK\x03\x04", 14), (b"PK\x01\x02", 16)] {
        let offsets: Vec<usize> = archive
            .windows(4)
            .enumerate()
            .filter(|(_, w)| *w == sig.as_slice())
            .map(|(i, _)| i)
            .collect();
        for pos in offsets {
            archive[pos + crc_at] ^= 0x01;
        }
    }
    archive
}

/// Appends `archive` and its footer to `host`.
pub fn frame(host: &[u8], archive: &[u8]) -> Vec<u8> {
    let mut out = host.to_vec();
    out.extend_from_slice(archive);
    out.extend_from_slice(&(archive.len() as u64).to_le_bytes());
    out.extend_from_slice(&Sha512::digest(archive));
    out
}

/// Temporary directory holding host files for one test.
pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Writes `bytes` to `name` inside the fixture directory.
    pub fn write(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// Writes a framed host file carrying `manifest` as `manifest.json`.
    pub fn host_with_manifest(&self, name: &str, manifest: &str) -> PathBuf {
        let archive = build_zip(&[("manifest.json", manifest.as_bytes())], true);
        self.write(name, &frame(HOST_BYTES, &archive))
    }
}
