//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `monostack-adapters` crate provides implementations.

use std::path::Path;
use std::time::Duration;

use crate::domain::{Catalog, SelectionSet};
use crate::error::MonostackResult;

/// Captured result of one external process call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// An all-good output with no captured text; handy for test doubles.
    pub fn ok() -> Self {
        Self {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
        }
    }
}

/// Port for catalog and compose-template access.
///
/// Implemented by:
/// - `monostack_adapters::catalog::EmbeddedCatalogStore` (built-in defaults)
/// - `monostack_adapters::catalog::FileCatalogStore` (user-supplied files)
///
/// Both loads must be idempotent and cached for the process lifetime: the
/// first call reads durable storage, subsequent calls return the cached
/// value even if the underlying resource changes.
#[cfg_attr(test, mockall::automock)]
pub trait CatalogStore: Send + Sync {
    /// Load the install-command catalog.
    fn load_catalog(&self) -> MonostackResult<Catalog>;

    /// Load the compose template as raw YAML.
    fn load_compose_template(&self) -> MonostackResult<String>;
}

/// Port for external process execution.
///
/// This is the only interface to package managers, framework CLIs, and
/// version control. The command string receives shell interpretation.
///
/// Implemented by:
/// - `monostack_adapters::process::ShellRunner` (production)
/// - `monostack_adapters::process::ScriptedRunner` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run a shell command with the given working directory, blocking until
    /// it exits or the optional timeout expires.
    fn run(
        &self,
        command: &str,
        cwd: &Path,
        timeout: Option<Duration>,
    ) -> MonostackResult<ProcessOutput>;
}

/// Port for filesystem operations.
///
/// Implemented by:
/// - `monostack_adapters::filesystem::LocalFilesystem` (production)
/// - `monostack_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Pre-existing
    /// directories are not an error.
    fn create_dir_all(&self, path: &Path) -> MonostackResult<()>;

    /// Write content to a UTF-8 text file, overwriting any previous content.
    fn write_file(&self, path: &Path, content: &str) -> MonostackResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for optional per-run enrichment of a generated project, run after
/// all modules are materialized and before the repository is finalized.
///
/// Used for the hello-world example and `.gitignore` generators, which are
/// content registries owned by the CLI. Returning `false` marks the extra
/// as skipped or failed; the run always continues.
pub trait ExtraGenerator: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &'static str;

    /// Generate extra content under `root` for the given selections.
    fn generate(&self, root: &Path, selections: &SelectionSet) -> bool;
}
