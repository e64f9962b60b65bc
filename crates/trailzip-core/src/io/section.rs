//! Bounded reader over a byte range of a seekable source.
//!
//! This module provides a `SectionReader` that exposes a window
//! `[start, start + len)` of any `Read + Seek` implementation as if it were
//! a standalone stream starting at offset zero.

use std::io;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

/// Reader restricted to a fixed byte range of an inner source.
///
/// Positions reported and accepted by `Seek` are relative to the start of
/// the section. Reads never return bytes outside the range; seeking past
/// the end is allowed and subsequent reads return `0`.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use std::io::Read;
/// use trailzip_core::io::SectionReader;
///
/// let data = Cursor::new(b"header|payload|footer".to_vec());
/// let mut section = SectionReader::new(data, 7, 7)?;
///
/// let mut out = String::new();
/// section.read_to_string(&mut out)?;
/// assert_eq!(out, "payload");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct SectionReader<R> {
    /// Source being windowed
    inner: R,
    /// Absolute offset of the first byte of the section
    start: u64,
    /// Length of the section in bytes
    len: u64,
    /// Current position relative to `start`
    pos: u64,
}

impl<R: Seek> SectionReader<R> {
    /// Creates a section over `[start, start + len)` and positions the inner
    /// source at `start`.
    ///
    /// # Errors
    ///
    /// Returns an error if `start + len` overflows or the inner seek fails.
    pub fn new(mut inner: R, start: u64, len: u64) -> io::Result<Self> {
        if start.checked_add(len).is_none() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "section end overflows u64",
            ));
        }
        inner.seek(SeekFrom::Start(start))?;
        Ok(Self {
            inner,
            start,
            len,
            pos: 0,
        })
    }
}

impl<R> SectionReader<R> {
    /// Returns the length of the section in bytes.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Returns `true` if the section is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the absolute offset of the section within the inner source.
    #[must_use]
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the current position relative to the section start.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Returns a reference to the inner source.
    #[must_use]
    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    /// Consumes the section and returns the inner source.
    #[must_use]
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for SectionReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.len.saturating_sub(self.pos);
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let max = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
        let n = self.inner.read(&mut buf[..max])?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl<R: Seek> Seek for SectionReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => self.len.checked_add_signed(delta),
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta),
        }
        .ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;

        let absolute = self.start.checked_add(target).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "seek position overflows u64")
        })?;
        self.inner.seek(SeekFrom::Start(absolute))?;
        self.pos = target;
        Ok(target)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.pos)
    }
}
