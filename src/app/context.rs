use std::path::Path;
use std::sync::Arc;

use crate::domain::configuration::resolve_config;
use crate::domain::{AppError, GameConfig};
use crate::ports::ClusterClient;
use crate::services::kube_client_http::DEFAULT_TIMEOUT;
use crate::services::{HttpClusterClient, resolve_endpoint};

/// Application context holding dependencies for command execution.
pub struct AppContext {
    config: GameConfig,
    client: Arc<dyn ClusterClient>,
    target: String,
}

impl AppContext {
    /// Create a new application context.
    pub fn new(config: GameConfig, client: Arc<dyn ClusterClient>, target: impl Into<String>) -> Self {
        Self { config, client, target: target.into() }
    }

    /// Load the game config and connect to the cluster selected by the
    /// kubeconfig (or the in-cluster service account).
    pub fn connect(
        config_path: Option<&Path>,
        kubeconfig: Option<&Path>,
        context: Option<&str>,
    ) -> Result<Self, AppError> {
        let config = resolve_config(config_path)?;
        let endpoint = resolve_endpoint(kubeconfig, context)?;
        tracing::info!("Using cluster {}", endpoint.describe());
        let client = HttpClusterClient::new(&endpoint, DEFAULT_TIMEOUT)?;
        Ok(Self::new(config, Arc::new(client), endpoint.describe()))
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Shared handle to the cluster client.
    pub fn client(&self) -> Arc<dyn ClusterClient> {
        Arc::clone(&self.client)
    }

    /// Human-readable name of the cluster being played against.
    pub fn target(&self) -> &str {
        &self.target
    }
}
