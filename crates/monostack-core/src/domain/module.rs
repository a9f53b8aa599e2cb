//! Module kinds and user selections.
//!
//! A *module* is one deployable unit of the generated project: the backend,
//! or one of the frontends. The database is a pseudo-module — it never gets
//! its own directory, only a compose service — so it lives on
//! [`SelectionSet`] as a plain name rather than a [`ModuleChoice`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// The four code module kinds, in canonical order.
///
/// The derived `Ord` follows declaration order, which is the canonical
/// processing order everywhere in the engine (materialization, compose
/// rendering, documentation).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleKind {
    Backend,
    FrontendWeb,
    FrontendMobile,
    FrontendDesktop,
}

impl ModuleKind {
    /// All module kinds in canonical order.
    pub const ALL: [ModuleKind; 4] = [
        ModuleKind::Backend,
        ModuleKind::FrontendWeb,
        ModuleKind::FrontendMobile,
        ModuleKind::FrontendDesktop,
    ];

    /// The hyphenated name used for directories, catalog keys, and
    /// compose service keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::FrontendWeb => "frontend-web",
            Self::FrontendMobile => "frontend-mobile",
            Self::FrontendDesktop => "frontend-desktop",
        }
    }

    /// The image placeholder a `{module}-generic` compose service carries,
    /// e.g. `${BACKEND_FRAMEWORK}` or `${FRONTEND_WEB_FRAMEWORK}`.
    pub fn framework_placeholder(&self) -> String {
        format!(
            "${{{}_FRAMEWORK}}",
            self.as_str().to_ascii_uppercase().replace('-', "_")
        )
    }

    /// First-letter-capitalized display name for generated READMEs.
    pub fn title(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| DomainError::UnknownModule { name: s.into() })
    }
}

/// A user's language + framework pick for one module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleChoice {
    pub language: String,
    pub framework: String,
}

impl ModuleChoice {
    pub fn new(language: impl Into<String>, framework: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            framework: framework.into(),
        }
    }

    /// A choice drives materialization only when both halves are non-empty.
    pub fn is_complete(&self) -> bool {
        !self.language.is_empty() && !self.framework.is_empty()
    }
}

/// The complete, immutable set of user selections driving one generation run.
///
/// Built once by the interactive layer (or CLI flags) and consumed read-only
/// by the engine. Iteration over [`SelectionSet::modules`] is always in
/// canonical [`ModuleKind`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    modules: BTreeMap<ModuleKind, ModuleChoice>,
    database: Option<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style: add a module choice.
    pub fn with_module(mut self, kind: ModuleKind, choice: ModuleChoice) -> Self {
        self.modules.insert(kind, choice);
        self
    }

    /// Builder-style: add a database selection.
    pub fn with_database(mut self, name: impl Into<String>) -> Self {
        self.database = Some(name.into());
        self
    }

    pub fn set_module(&mut self, kind: ModuleKind, choice: ModuleChoice) {
        self.modules.insert(kind, choice);
    }

    pub fn set_database(&mut self, name: impl Into<String>) {
        self.database = Some(name.into());
    }

    pub fn module(&self, kind: ModuleKind) -> Option<&ModuleChoice> {
        self.modules.get(&kind)
    }

    /// Selected code modules in canonical order.
    pub fn modules(&self) -> impl Iterator<Item = (ModuleKind, &ModuleChoice)> {
        self.modules.iter().map(|(k, c)| (*k, c))
    }

    pub fn database(&self) -> Option<&str> {
        self.database.as_deref()
    }

    /// True when neither a module nor a database was selected.
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.database.is_none()
    }

    /// Number of selected code modules.
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }
}
