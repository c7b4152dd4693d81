//! Kubernetes cluster port definition.

use crate::domain::{AppError, ResourceInfo, ResourceKind};

/// Port for the cluster operations the game needs.
///
/// Implementations are shared between the frame loop, the resource feed
/// and the reaper, so they must be usable from any thread.
pub trait ClusterClient: Send + Sync {
    /// Names of every namespace visible to the current credentials.
    fn list_namespaces(&self) -> Result<Vec<String>, AppError>;

    /// Eligible objects of `kind` in `namespace`.
    fn list_resources(
        &self,
        kind: ResourceKind,
        namespace: &str,
    ) -> Result<Vec<ResourceInfo>, AppError>;

    /// Delete one object.
    fn delete_resource(&self, resource: &ResourceInfo) -> Result<(), AppError>;
}
