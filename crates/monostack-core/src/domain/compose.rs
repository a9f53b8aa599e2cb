//! The Docker Compose document model.
//!
//! A compose file has three sections the engine cares about: `version`,
//! `services`, and the optional `networks`/`volumes` passthrough sections.
//! Service bodies are kept as raw YAML values so environment, ports, and
//! volume definitions flow through rendering untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Version written when the template omits one.
pub const DEFAULT_COMPOSE_VERSION: &str = "3";

/// A parsed compose template or rendered compose document.
///
/// `BTreeMap` keeps service ordering deterministic, so serializing the same
/// document twice yields byte-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposeFile {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub services: BTreeMap<String, serde_yaml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub networks: Option<serde_yaml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volumes: Option<serde_yaml::Value>,
}

fn default_version() -> String {
    DEFAULT_COMPOSE_VERSION.to_string()
}

impl Default for ComposeFile {
    fn default() -> Self {
        Self {
            version: default_version(),
            services: BTreeMap::new(),
            networks: None,
            volumes: None,
        }
    }
}

impl ComposeFile {
    /// Parse a compose template from YAML source.
    pub fn parse(yaml: &str) -> Result<Self, DomainError> {
        serde_yaml::from_str(yaml).map_err(|e| DomainError::InvalidComposeTemplate {
            reason: e.to_string(),
        })
    }

    /// Serialize back to YAML.
    pub fn to_yaml(&self) -> Result<String, DomainError> {
        serde_yaml::to_string(self).map_err(|e| DomainError::InvalidComposeTemplate {
            reason: format!("serialization failed: {e}"),
        })
    }

    pub fn service(&self, key: &str) -> Option<&serde_yaml::Value> {
        self.services.get(key)
    }

    pub fn service_keys(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }
}
