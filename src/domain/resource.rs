//! Cluster resources the snake can eat.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Annotation marking a pod the scheduler must never evict.
pub const CRITICAL_POD_ANNOTATION: &str = "scheduler.alpha.kubernetes.io/critical-pod";

/// Resource types that can be linked to food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Pods,
    Deployments,
    Services,
    Configmaps,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] =
        [ResourceKind::Pods, ResourceKind::Deployments, ResourceKind::Services, ResourceKind::Configmaps];

    /// Plural name as written in config files.
    pub fn config_name(&self) -> &'static str {
        match self {
            ResourceKind::Pods => "pods",
            ResourceKind::Deployments => "deployments",
            ResourceKind::Services => "services",
            ResourceKind::Configmaps => "configmaps",
        }
    }

    /// Singular name used in messages and logs.
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Pods => "pod",
            ResourceKind::Deployments => "deployment",
            ResourceKind::Services => "service",
            ResourceKind::Configmaps => "configmap",
        }
    }

    /// REST path of the namespaced collection.
    pub fn collection_path(&self, namespace: &str) -> String {
        match self {
            ResourceKind::Deployments => {
                format!("/apis/apps/v1/namespaces/{namespace}/deployments")
            }
            other => format!("/api/v1/namespaces/{namespace}/{}", other.config_name()),
        }
    }

    /// REST path of a single object.
    pub fn object_path(&self, namespace: &str, name: &str) -> String {
        format!("{}/{name}", self.collection_path(namespace))
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.singular())
    }
}

/// A concrete object in the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceInfo {
    pub namespace: String,
    pub kind: ResourceKind,
    pub name: String,
}

impl ResourceInfo {
    pub fn new(kind: ResourceKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), kind, name: name.into() }
    }

    pub fn pod(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ResourceKind::Pods, namespace, name)
    }

    /// `namespace/kind/name`, the form printed by `serpent targets`.
    pub fn qualified_name(&self) -> String {
        format!("{}/{}/{}", self.namespace, self.kind.singular(), self.name)
    }
}

impl fmt::Display for ResourceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} in namespace {}", self.kind, self.name, self.namespace)
    }
}

/// The part of Kubernetes `ObjectMeta` serpent cares about.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMeta {
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub deletion_timestamp: Option<String>,
}

impl ResourceMeta {
    fn has_annotation(&self, key: &str) -> bool {
        self.annotations.as_ref().is_some_and(|annotations| annotations.contains_key(key))
    }
}

/// Whether an object may be linked to food.
///
/// Critical pods, objects already terminating, and the objects every
/// cluster relies on (the `kubernetes` API service and the root CA bundle)
/// are never offered.
pub fn is_eligible(kind: ResourceKind, meta: &ResourceMeta) -> bool {
    if meta.deletion_timestamp.is_some() {
        return false;
    }
    match kind {
        ResourceKind::Pods => !meta.has_annotation(CRITICAL_POD_ANNOTATION),
        ResourceKind::Services => {
            !(meta.name == "kubernetes" && meta.namespace.as_deref() == Some("default"))
        }
        ResourceKind::Configmaps => meta.name != "kube-root-ca.crt",
        ResourceKind::Deployments => true,
    }
}
