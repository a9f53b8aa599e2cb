//! The install-command catalog.
//!
//! A nested, read-only mapping loaded once per process:
//! module → language → framework → install-command template, plus a flat
//! list of database options. Absence of a (module, language, framework)
//! triple is a valid, expected state meaning "no automated install
//! available" — never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::module::ModuleKind;

/// language → framework → install-command template.
pub type LanguageTable = BTreeMap<String, BTreeMap<String, String>>;

/// The immutable technology catalog.
///
/// Deserialized from JSON of the shape:
///
/// ```json
/// {
///   "backend": { "python": { "flask": "pip install flask ..." } },
///   "frontend-web": { "javascript": { "react": "npx create-react-app {module}" } },
///   "databases": { "postgres": {}, "mysql": {} }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Database options; the values are opaque to the engine.
    #[serde(default)]
    databases: BTreeMap<String, serde_json::Value>,

    /// All remaining top-level keys are module tables.
    #[serde(flatten)]
    modules: BTreeMap<String, LanguageTable>,
}

impl Catalog {
    /// Look up the install-command template for a selection, if one exists.
    pub fn install_command(
        &self,
        module: ModuleKind,
        language: &str,
        framework: &str,
    ) -> Option<&str> {
        self.modules
            .get(module.as_str())?
            .get(language)?
            .get(framework)
            .map(String::as_str)
    }

    /// Languages available for a module, in catalog (sorted) order.
    pub fn languages(&self, module: ModuleKind) -> Vec<&str> {
        self.modules
            .get(module.as_str())
            .map(|table| table.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Frameworks available for a module + language pair.
    pub fn frameworks(&self, module: ModuleKind, language: &str) -> Vec<&str> {
        self.modules
            .get(module.as_str())
            .and_then(|table| table.get(language))
            .map(|frameworks| frameworks.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Names of the available database options.
    pub fn database_names(&self) -> Vec<&str> {
        self.databases.keys().map(String::as_str).collect()
    }

    /// True when the catalog has an entry table for the given module kind.
    pub fn has_module(&self, module: ModuleKind) -> bool {
        self.modules.contains_key(module.as_str())
    }
}
