use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use crate::domain::{AppError, ResourceInfo, ResourceKind};
use crate::ports::ClusterClient;

/// In-memory cluster that records deletions.
#[derive(Clone, Default)]
pub struct FakeClusterClient {
    pub resources: Arc<Mutex<Vec<ResourceInfo>>>,
    pub deleted: Arc<Mutex<Vec<ResourceInfo>>>,
    extra_namespaces: Vec<String>,
    failing_namespaces: Vec<String>,
    fail_namespace_listing: bool,
    fail_deletes: bool,
}

impl FakeClusterClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource(self, resource: ResourceInfo) -> Self {
        self.resources.lock().unwrap().push(resource);
        self
    }

    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.extra_namespaces.push(namespace.to_string());
        self
    }

    pub fn failing_namespace(mut self, namespace: &str) -> Self {
        self.failing_namespaces.push(namespace.to_string());
        self
    }

    pub fn failing_namespace_listing(mut self) -> Self {
        self.fail_namespace_listing = true;
        self
    }

    pub fn failing_deletes(mut self) -> Self {
        self.fail_deletes = true;
        self
    }

    pub fn deleted(&self) -> Vec<ResourceInfo> {
        self.deleted.lock().unwrap().clone()
    }
}

impl ClusterClient for FakeClusterClient {
    fn list_namespaces(&self) -> Result<Vec<String>, AppError> {
        if self.fail_namespace_listing {
            return Err(AppError::Api { status: 403, message: "forbidden".into() });
        }
        let mut namespaces: BTreeSet<String> =
            self.resources.lock().unwrap().iter().map(|r| r.namespace.clone()).collect();
        namespaces.extend(self.extra_namespaces.iter().cloned());
        Ok(namespaces.into_iter().collect())
    }

    fn list_resources(
        &self,
        kind: ResourceKind,
        namespace: &str,
    ) -> Result<Vec<ResourceInfo>, AppError> {
        if self.failing_namespaces.iter().any(|ns| ns == namespace) {
            return Err(AppError::Api { status: 403, message: "forbidden".into() });
        }
        Ok(self
            .resources
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.kind == kind && r.namespace == namespace)
            .cloned()
            .collect())
    }

    fn delete_resource(&self, resource: &ResourceInfo) -> Result<(), AppError> {
        if self.fail_deletes {
            return Err(AppError::Api { status: 500, message: "boom".into() });
        }
        let mut resources = self.resources.lock().unwrap();
        let before = resources.len();
        resources.retain(|r| r != resource);
        if resources.len() == before {
            return Err(AppError::Api {
                status: 404,
                message: format!("{} \"{}\" not found", resource.kind.config_name(), resource.name),
            });
        }
        self.deleted.lock().unwrap().push(resource.clone());
        Ok(())
    }
}
