//! In-memory filesystem adapter for testing.

use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use monostack_core::application::ports::Filesystem;

/// In-memory filesystem for testing.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: HashMap<PathBuf, String>,
    directories: HashSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().ok()?;
        inner.files.get(path).cloned()
    }

    /// List all files, sorted for stable assertions.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap_or_else(|p| p.into_inner());
        let mut files: Vec<PathBuf> = inner.files.keys().cloned().collect();
        files.sort();
        files
    }

    /// Clear all contents.
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(|p| p.into_inner());
        inner.files.clear();
        inner.directories.clear();
    }
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> monostack_core::error::MonostackResult<()> {
        let mut inner = self.inner.write().unwrap_or_else(|p| p.into_inner());

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> monostack_core::error::MonostackResult<()> {
        let mut inner = self.inner.write().unwrap_or_else(|p| p.into_inner());

        // Ensure parent exists, mirroring real filesystem behavior.
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(monostack_core::application::ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap_or_else(|p| p.into_inner());
        inner.files.contains_key(path) || inner.directories.contains(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_include_all_ancestors() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("/proj/backend/src")).unwrap();

        assert!(fs.exists(Path::new("/proj")));
        assert!(fs.exists(Path::new("/proj/backend")));
        assert!(fs.exists(Path::new("/proj/backend/src")));
        assert!(!fs.exists(Path::new("/proj/frontend-web")));
    }

    #[test]
    fn write_requires_parent_directory() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("/proj/file.txt"), "x").is_err());

        fs.create_dir_all(Path::new("/proj")).unwrap();
        fs.write_file(Path::new("/proj/file.txt"), "x").unwrap();
        assert_eq!(fs.read_file(Path::new("/proj/file.txt")).unwrap(), "x");
    }

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();

        fs.create_dir_all(Path::new("/proj")).unwrap();
        fs.write_file(Path::new("/proj/a.txt"), "a").unwrap();

        assert_eq!(other.read_file(Path::new("/proj/a.txt")).unwrap(), "a");
        assert_eq!(other.list_files(), vec![PathBuf::from("/proj/a.txt")]);
    }
}
