//! Kubernetes REST client implementation using reqwest.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::ACCEPT;
use reqwest::{Certificate, Identity};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::domain::resource::is_eligible;
use crate::domain::{AppError, ResourceInfo, ResourceKind, ResourceMeta};
use crate::ports::ClusterClient;
use crate::services::kubeconfig::{ClusterAuth, ClusterEndpoint};

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for the Kubernetes API server.
pub struct HttpClusterClient {
    server: Url,
    auth: ClusterAuth,
    client: Client,
}

impl std::fmt::Debug for HttpClusterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClusterClient")
            .field("server", &self.server)
            .field("auth", &"[REDACTED]")
            .finish()
    }
}

impl HttpClusterClient {
    /// Build a client for `endpoint`.
    pub fn new(endpoint: &ClusterEndpoint, timeout: Duration) -> Result<Self, AppError> {
        let mut builder = Client::builder().timeout(timeout);

        if let Some(ca) = &endpoint.ca_pem {
            let certificates = Certificate::from_pem_bundle(ca)
                .map_err(|e| AppError::Kubeconfig(format!("invalid CA certificate: {e}")))?;
            for certificate in certificates {
                builder = builder.add_root_certificate(certificate);
            }
        }
        if let Some(identity) = &endpoint.identity_pem {
            let identity = Identity::from_pem(identity)
                .map_err(|e| AppError::Kubeconfig(format!("invalid client certificate: {e}")))?;
            builder = builder.identity(identity);
        }
        if endpoint.insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { server: endpoint.server.clone(), auth: endpoint.auth.clone(), client })
    }

    /// Server URL with `path` appended, keeping any path prefix the server
    /// URL already carries (API proxies mount the API under one).
    fn url(&self, path: &str) -> Result<Url, AppError> {
        let base = self.server.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}{path}"))
            .map_err(|e| AppError::Configuration(format!("Invalid API URL for {path}: {e}")))
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth {
            ClusterAuth::Anonymous => request,
            ClusterAuth::Bearer(token) => request.bearer_auth(token),
            ClusterAuth::Basic { username, password } => {
                request.basic_auth(username, Some(password))
            }
        }
    }

    fn send(&self, request: RequestBuilder) -> Result<Response, AppError> {
        let response = self
            .authorize(request)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| AppError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let message = serde_json::from_str::<ApiStatus>(&body)
            .ok()
            .and_then(|s| s.message)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    status.canonical_reason().unwrap_or("Unknown error").to_string()
                } else {
                    body.trim().to_string()
                }
            });
        Err(AppError::Api { status: status.as_u16(), message })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let url = self.url(path)?;
        self.send(self.client.get(url))?
            .json()
            .map_err(|e| AppError::parse_error(format!("response from {path}"), e))
    }
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ObjectList {
    #[serde(default)]
    items: Option<Vec<ObjectItem>>,
}

#[derive(Debug, Deserialize)]
struct ObjectItem {
    metadata: ResourceMeta,
}

impl ClusterClient for HttpClusterClient {
    fn list_namespaces(&self) -> Result<Vec<String>, AppError> {
        let list: ObjectList = self.get_json("/api/v1/namespaces")?;
        Ok(list.items.unwrap_or_default().into_iter().map(|item| item.metadata.name).collect())
    }

    fn list_resources(
        &self,
        kind: ResourceKind,
        namespace: &str,
    ) -> Result<Vec<ResourceInfo>, AppError> {
        let list: ObjectList = self.get_json(&kind.collection_path(namespace))?;
        Ok(list
            .items
            .unwrap_or_default()
            .into_iter()
            .filter(|item| is_eligible(kind, &item.metadata))
            .map(|item| {
                let ResourceMeta { name, namespace: object_namespace, .. } = item.metadata;
                ResourceInfo::new(
                    kind,
                    object_namespace.unwrap_or_else(|| namespace.to_string()),
                    name,
                )
            })
            .collect())
    }

    fn delete_resource(&self, resource: &ResourceInfo) -> Result<(), AppError> {
        let url = self.url(&resource.kind.object_path(&resource.namespace, &resource.name))?;
        self.send(self.client.delete(url))?;
        Ok(())
    }
}
