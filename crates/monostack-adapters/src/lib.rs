//! Infrastructure adapters for Monostack.
//!
//! This crate implements the ports defined in `monostack-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod catalog;
pub mod filesystem;
pub mod process;

// Re-export commonly used adapters
pub use catalog::{EmbeddedCatalogStore, FileCatalogStore};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{ScriptedRunner, ShellRunner};
