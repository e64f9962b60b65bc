//! I/O utilities for reading embedded archives.
//!
//! This module provides the bounded reader used to expose the archive region
//! of a host file as a standalone seekable stream.

pub mod section;

// Re-export main types for convenience
pub use section::SectionReader;
