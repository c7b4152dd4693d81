//! Game configuration domain models.

use serde::{Deserialize, Serialize};

use crate::domain::AppError;
use crate::domain::resource::ResourceKind;

/// Configuration loaded from the file passed with `--config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GameConfig {
    /// Resource types that food may be linked to.
    #[serde(default = "default_resource_types")]
    pub resource_types: Vec<ResourceKind>,
    /// Namespaces to hunt in.
    #[serde(default)]
    pub namespaces: NamespaceFilter,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { resource_types: default_resource_types(), namespaces: NamespaceFilter::default() }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.resource_types.is_empty() {
            return Err(AppError::NoResourceTypes);
        }
        Ok(())
    }
}

/// Include/exclude lists applied to namespace names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamespaceFilter {
    /// When non-empty, only these namespaces are considered.
    #[serde(default)]
    pub include: Vec<String>,
    /// Never considered, even when also included.
    #[serde(default = "default_excluded_namespaces")]
    pub exclude: Vec<String>,
}

impl Default for NamespaceFilter {
    fn default() -> Self {
        Self { include: Vec::new(), exclude: default_excluded_namespaces() }
    }
}

impl NamespaceFilter {
    pub fn allows(&self, namespace: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|ns| ns == namespace);
        included && !self.exclude.iter().any(|ns| ns == namespace)
    }
}

fn default_resource_types() -> Vec<ResourceKind> {
    vec![ResourceKind::Pods]
}

fn default_excluded_namespaces() -> Vec<String> {
    vec!["kube-system".to_string()]
}
