//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use monostack_core::{application::ports::Filesystem, error::MonostackResult};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> MonostackResult<()> {
        std::fs::create_dir_all(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> MonostackResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> monostack_core::error::MonostackError {
    use monostack_core::application::ApplicationError;

    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_directories_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();

        let nested = dir.path().join("a/b/c");
        fs.create_dir_all(&nested).unwrap();
        assert!(fs.exists(&nested));

        let file = nested.join("README.md");
        fs.write_file(&file, "# hi\n").unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "# hi\n");

        // Overwrite replaces content.
        fs.write_file(&file, "# replaced\n").unwrap();
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "# replaced\n");
    }

    #[test]
    fn write_without_parent_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let fs = LocalFilesystem::new();
        let result = fs.write_file(&dir.path().join("missing/file.txt"), "x");
        assert!(result.is_err());
    }
}
