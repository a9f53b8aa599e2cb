//! File-backed catalog store.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::debug;

use monostack_core::{
    application::{ports::CatalogStore, ApplicationError},
    domain::Catalog,
    error::MonostackResult,
};

/// Catalog store reading user-supplied files.
///
/// Both resources are read at most once per process; later calls return the
/// cached value even if the files change on disk. A load that fails is not
/// cached, so a corrected file can succeed on retry within the same process.
#[derive(Debug)]
pub struct FileCatalogStore {
    commands_path: PathBuf,
    template_path: PathBuf,
    catalog: OnceLock<Catalog>,
    template: OnceLock<String>,
}

impl FileCatalogStore {
    /// Create a store reading the catalog and compose template from the
    /// given paths.
    pub fn new(commands_path: impl Into<PathBuf>, template_path: impl Into<PathBuf>) -> Self {
        Self {
            commands_path: commands_path.into(),
            template_path: template_path.into(),
            catalog: OnceLock::new(),
            template: OnceLock::new(),
        }
    }

    pub fn commands_path(&self) -> &Path {
        &self.commands_path
    }

    pub fn template_path(&self) -> &Path {
        &self.template_path
    }
}

impl CatalogStore for FileCatalogStore {
    fn load_catalog(&self) -> MonostackResult<Catalog> {
        if let Some(catalog) = self.catalog.get() {
            return Ok(catalog.clone());
        }

        debug!(path = %self.commands_path.display(), "Loading catalog");
        let raw = std::fs::read_to_string(&self.commands_path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ApplicationError::CatalogNotFound {
                    path: self.commands_path.clone(),
                }
            } else {
                ApplicationError::FilesystemError {
                    path: self.commands_path.clone(),
                    reason: format!("Failed to read catalog: {}", e),
                }
            }
        })?;

        let catalog: Catalog = serde_json::from_str(&raw).map_err(|e| {
            ApplicationError::MalformedCatalog {
                reason: e.to_string(),
            }
        })?;

        Ok(self.catalog.get_or_init(|| catalog).clone())
    }

    fn load_compose_template(&self) -> MonostackResult<String> {
        if let Some(template) = self.template.get() {
            return Ok(template.clone());
        }

        debug!(path = %self.template_path.display(), "Loading compose template");
        let raw = std::fs::read_to_string(&self.template_path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ApplicationError::TemplateNotFound {
                    path: self.template_path.clone(),
                }
            } else {
                ApplicationError::FilesystemError {
                    path: self.template_path.clone(),
                    reason: format!("Failed to read compose template: {}", e),
                }
            }
        })?;

        Ok(self.template.get_or_init(|| raw).clone())
    }
}
