//! Deletes eaten resources off the frame loop.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::domain::{AppError, ResourceInfo};
use crate::ports::ClusterClient;

/// Background deleter. Cloning shares the client.
#[derive(Clone)]
pub struct Reaper {
    client: Arc<dyn ClusterClient>,
    dry_run: bool,
}

impl Reaper {
    pub fn new(client: Arc<dyn ClusterClient>, dry_run: bool) -> Self {
        Self { client, dry_run }
    }

    /// Delete `resource` on a background thread. The outcome is only logged.
    pub fn reap(&self, resource: ResourceInfo) -> Result<JoinHandle<()>, AppError> {
        let reaper = self.clone();
        let handle = thread::Builder::new().name("reaper".into()).spawn(move || {
            let _ = reaper.delete_now(&resource);
        })?;
        Ok(handle)
    }

    /// Delete `resource` on the calling thread and log the outcome.
    pub fn delete_now(&self, resource: &ResourceInfo) -> Result<(), AppError> {
        if self.dry_run {
            tracing::info!("dry run: would delete {resource}");
            return Ok(());
        }

        match self.client.delete_resource(resource) {
            Ok(()) => {
                tracing::info!(
                    "{} deleted: {} in namespace {}",
                    resource.kind,
                    resource.name,
                    resource.namespace
                );
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                tracing::info!("{resource} was already gone");
                Ok(())
            }
            Err(err) => {
                tracing::error!("Error deleting {resource}: {err}");
                Err(err)
            }
        }
    }
}
