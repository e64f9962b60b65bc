//! Subcommand implementations.

pub mod cat;
pub mod completion;
pub mod inspect;
pub mod list;
pub mod manifest;
