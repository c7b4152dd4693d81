//! Cluster endpoint resolution from a kubeconfig file or the in-cluster environment.

use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::Deserialize;
use url::Url;

use crate::domain::AppError;

const SERVICE_ACCOUNT_DIR: &str = "/var/run/secrets/kubernetes.io/serviceaccount";
const DEFAULT_EXEC_API_VERSION: &str = "client.authentication.k8s.io/v1beta1";

/// How requests authenticate against the API server.
#[derive(Clone, PartialEq, Eq)]
pub enum ClusterAuth {
    Anonymous,
    Bearer(String),
    Basic { username: String, password: String },
}

/// Everything needed to talk to one API server.
#[derive(Clone)]
pub struct ClusterEndpoint {
    pub server: Url,
    /// Context name, or `in-cluster`.
    pub context: String,
    /// PEM bundle of trusted CAs.
    pub ca_pem: Option<Vec<u8>>,
    /// Client certificate followed by its private key, PEM.
    pub identity_pem: Option<Vec<u8>>,
    pub auth: ClusterAuth,
    pub insecure: bool,
}

impl fmt::Debug for ClusterEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let auth = match &self.auth {
            ClusterAuth::Anonymous => "anonymous",
            ClusterAuth::Bearer(_) => "bearer [REDACTED]",
            ClusterAuth::Basic { .. } => "basic [REDACTED]",
        };
        f.debug_struct("ClusterEndpoint")
            .field("server", &self.server)
            .field("context", &self.context)
            .field("ca_pem", &self.ca_pem.is_some())
            .field("identity_pem", &self.identity_pem.as_ref().map(|_| "[REDACTED]"))
            .field("auth", &auth)
            .field("insecure", &self.insecure)
            .finish()
    }
}

impl ClusterEndpoint {
    /// An anonymous endpoint without TLS customisation.
    pub fn new(server: Url, context: impl Into<String>) -> Self {
        Self {
            server,
            context: context.into(),
            ca_pem: None,
            identity_pem: None,
            auth: ClusterAuth::Anonymous,
            insecure: false,
        }
    }

    pub fn with_auth(mut self, auth: ClusterAuth) -> Self {
        self.auth = auth;
        self
    }

    /// `context (server)`, for prompts and logs.
    pub fn describe(&self) -> String {
        format!("{} ({})", self.context, self.server)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct KubeConfigFile {
    #[serde(default)]
    clusters: Vec<NamedCluster>,
    #[serde(default)]
    users: Vec<NamedUser>,
    #[serde(default)]
    contexts: Vec<NamedContext>,
    #[serde(default)]
    current_context: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamedCluster {
    name: String,
    cluster: ClusterEntry,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ClusterEntry {
    server: String,
    #[serde(default)]
    certificate_authority: Option<PathBuf>,
    #[serde(default)]
    certificate_authority_data: Option<String>,
    #[serde(default)]
    insecure_skip_tls_verify: bool,
}

#[derive(Debug, Deserialize)]
struct NamedUser {
    name: String,
    #[serde(default)]
    user: UserEntry,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct UserEntry {
    #[serde(default)]
    token: Option<String>,
    #[serde(default, rename = "tokenFile")]
    token_file: Option<PathBuf>,
    #[serde(default)]
    client_certificate: Option<PathBuf>,
    #[serde(default)]
    client_certificate_data: Option<String>,
    #[serde(default)]
    client_key: Option<PathBuf>,
    #[serde(default)]
    client_key_data: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    exec: Option<ExecConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecConfig {
    command: String,
    #[serde(default)]
    args: Option<Vec<String>>,
    #[serde(default)]
    env: Option<Vec<ExecEnvVar>>,
    #[serde(default)]
    api_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExecEnvVar {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct ExecCredential {
    #[serde(default)]
    status: Option<ExecCredentialStatus>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExecCredentialStatus {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    client_certificate_data: Option<String>,
    #[serde(default)]
    client_key_data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NamedContext {
    name: String,
    context: ContextEntry,
}

#[derive(Debug, Deserialize)]
struct ContextEntry {
    cluster: String,
    #[serde(default)]
    user: Option<String>,
}

/// First entry of `$KUBECONFIG`, else `~/.kube/config`.
pub fn default_kubeconfig_path() -> Option<PathBuf> {
    if let Some(paths) = env::var_os("KUBECONFIG") {
        if let Some(first) = env::split_paths(&paths).find(|p| !p.as_os_str().is_empty()) {
            return Some(first);
        }
    }
    dirs::home_dir().map(|home| home.join(".kube").join("config"))
}

/// Resolve the endpoint to play against.
///
/// The kubeconfig (explicit path or default location) is tried first; if it
/// cannot be used, the in-cluster service account is tried. When both fail
/// the error carries both reasons.
pub fn resolve_endpoint(
    kubeconfig: Option<&Path>,
    context: Option<&str>,
) -> Result<ClusterEndpoint, AppError> {
    let from_file = match kubeconfig.map(Path::to_path_buf).or_else(default_kubeconfig_path) {
        Some(path) => load_kubeconfig(&path, context),
        None => Err(AppError::Kubeconfig("no kubeconfig path and no home directory".into())),
    };

    match from_file {
        Ok(endpoint) => Ok(endpoint),
        Err(file_err) => {
            tracing::warn!("Error building kubeconfig: {file_err}");
            in_cluster_endpoint().map_err(|cluster_err| AppError::NoClusterCredentials {
                kubeconfig: file_err.to_string(),
                in_cluster: cluster_err.to_string(),
            })
        }
    }
}

/// Read and resolve a kubeconfig file.
pub fn load_kubeconfig(path: &Path, context: Option<&str>) -> Result<ClusterEndpoint, AppError> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::Kubeconfig(format!("cannot read {}: {e}", path.display())))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    parse_kubeconfig(&content, base_dir, context)
}

/// Resolve kubeconfig content. Relative file references are taken from `base_dir`.
pub fn parse_kubeconfig(
    content: &str,
    base_dir: &Path,
    context: Option<&str>,
) -> Result<ClusterEndpoint, AppError> {
    let file: KubeConfigFile = serde_yaml::from_str(content)
        .map_err(|e| AppError::Kubeconfig(format!("invalid kubeconfig: {e}")))?;

    let context_name = context
        .map(str::to_string)
        .or_else(|| file.current_context.clone())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::Kubeconfig("current-context is not set".into()))?;

    let entry = file
        .contexts
        .iter()
        .find(|c| c.name == context_name)
        .map(|c| &c.context)
        .ok_or_else(|| AppError::Kubeconfig(format!("context '{context_name}' not found")))?;

    let cluster = file
        .clusters
        .iter()
        .find(|c| c.name == entry.cluster)
        .map(|c| &c.cluster)
        .ok_or_else(|| AppError::Kubeconfig(format!("cluster '{}' not found", entry.cluster)))?;

    let user = match entry.user.as_deref().filter(|name| !name.is_empty()) {
        Some(name) => Some(
            file.users
                .iter()
                .find(|u| u.name == name)
                .map(|u| &u.user)
                .ok_or_else(|| AppError::Kubeconfig(format!("user '{name}' not found")))?,
        ),
        None => None,
    };

    let server = Url::parse(&cluster.server).map_err(|e| {
        AppError::Kubeconfig(format!("invalid server URL '{}': {e}", cluster.server))
    })?;

    let ca_pem = read_pem(
        cluster.certificate_authority_data.as_deref(),
        cluster.certificate_authority.as_deref(),
        base_dir,
        "certificate-authority",
    )?;

    let (auth, identity_pem) = match user {
        Some(user) => resolve_user(user, base_dir)?,
        None => (ClusterAuth::Anonymous, None),
    };

    Ok(ClusterEndpoint {
        server,
        context: context_name,
        ca_pem,
        identity_pem,
        auth,
        insecure: cluster.insecure_skip_tls_verify,
    })
}

/// Endpoint from the pod's service account.
pub fn in_cluster_endpoint() -> Result<ClusterEndpoint, AppError> {
    in_cluster_endpoint_from(
        env::var("KUBERNETES_SERVICE_HOST").ok(),
        env::var("KUBERNETES_SERVICE_PORT").ok(),
        Path::new(SERVICE_ACCOUNT_DIR),
    )
}

pub fn in_cluster_endpoint_from(
    host: Option<String>,
    port: Option<String>,
    service_account_dir: &Path,
) -> Result<ClusterEndpoint, AppError> {
    let host = host.filter(|h| !h.is_empty()).ok_or_else(|| {
        AppError::Kubeconfig("KUBERNETES_SERVICE_HOST is not set, not running in a cluster".into())
    })?;
    let port = port.filter(|p| !p.is_empty()).unwrap_or_else(|| "443".to_string());
    let host = if host.contains(':') { format!("[{host}]") } else { host };
    let server = Url::parse(&format!("https://{host}:{port}"))
        .map_err(|e| AppError::Kubeconfig(format!("invalid in-cluster address: {e}")))?;

    let token_path = service_account_dir.join("token");
    let token = fs::read_to_string(&token_path).map_err(|e| {
        AppError::Kubeconfig(format!("cannot read {}: {e}", token_path.display()))
    })?;
    let ca_pem = fs::read(service_account_dir.join("ca.crt")).ok();

    Ok(ClusterEndpoint {
        server,
        context: "in-cluster".to_string(),
        ca_pem,
        identity_pem: None,
        auth: ClusterAuth::Bearer(token.trim().to_string()),
        insecure: false,
    })
}

fn resolve_user(
    user: &UserEntry,
    base_dir: &Path,
) -> Result<(ClusterAuth, Option<Vec<u8>>), AppError> {
    let cert = read_pem(
        user.client_certificate_data.as_deref(),
        user.client_certificate.as_deref(),
        base_dir,
        "client-certificate",
    )?;
    let key = read_pem(
        user.client_key_data.as_deref(),
        user.client_key.as_deref(),
        base_dir,
        "client-key",
    )?;
    let mut identity = join_identity(cert, key)?;

    let mut auth = if let Some(token) = user.token.as_deref().filter(|t| !t.is_empty()) {
        ClusterAuth::Bearer(token.to_string())
    } else if let Some(path) = &user.token_file {
        let path = resolve_path(base_dir, path);
        let token = fs::read_to_string(&path).map_err(|e| {
            AppError::Kubeconfig(format!("cannot read tokenFile {}: {e}", path.display()))
        })?;
        ClusterAuth::Bearer(token.trim().to_string())
    } else if let (Some(username), Some(password)) = (&user.username, &user.password) {
        ClusterAuth::Basic { username: username.clone(), password: password.clone() }
    } else {
        ClusterAuth::Anonymous
    };

    if auth == ClusterAuth::Anonymous && identity.is_none() {
        if let Some(exec) = &user.exec {
            let status = run_exec_plugin(exec)?;
            if let Some(token) = status.token.filter(|t| !t.is_empty()) {
                auth = ClusterAuth::Bearer(token);
            }
            identity = join_identity(
                status.client_certificate_data.map(String::into_bytes),
                status.client_key_data.map(String::into_bytes),
            )?;
        }
    }

    Ok((auth, identity))
}

fn join_identity(
    cert: Option<Vec<u8>>,
    key: Option<Vec<u8>>,
) -> Result<Option<Vec<u8>>, AppError> {
    match (cert, key) {
        (Some(mut pem), Some(key)) => {
            if !pem.ends_with(b"\n") {
                pem.push(b'\n');
            }
            pem.extend_from_slice(&key);
            Ok(Some(pem))
        }
        (None, None) => Ok(None),
        _ => Err(AppError::Kubeconfig(
            "client certificate and client key must be configured together".into(),
        )),
    }
}

fn run_exec_plugin(exec: &ExecConfig) -> Result<ExecCredentialStatus, AppError> {
    let api_version = exec.api_version.as_deref().unwrap_or(DEFAULT_EXEC_API_VERSION);
    let exec_info = serde_json::json!({
        "apiVersion": api_version,
        "kind": "ExecCredential",
        "spec": { "interactive": false },
    });

    let mut command = Command::new(&exec.command);
    command
        .args(exec.args.iter().flatten())
        .env("KUBERNETES_EXEC_INFO", exec_info.to_string())
        .stdin(Stdio::null())
        .stderr(Stdio::piped());
    for var in exec.env.iter().flatten() {
        command.env(&var.name, &var.value);
    }

    let output = command.output().map_err(|e| {
        AppError::Kubeconfig(format!("cannot run credential plugin '{}': {e}", exec.command))
    })?;
    if !output.status.success() {
        return Err(AppError::Kubeconfig(format!(
            "credential plugin '{}' failed: {}",
            exec.command,
            String::from_utf8_lossy(&output.stderr).trim()
        )));
    }

    let credential: ExecCredential = serde_json::from_slice(&output.stdout).map_err(|e| {
        AppError::Kubeconfig(format!("credential plugin '{}' output: {e}", exec.command))
    })?;
    credential.status.ok_or_else(|| {
        AppError::Kubeconfig(format!("credential plugin '{}' returned no status", exec.command))
    })
}

fn read_pem(
    data: Option<&str>,
    file: Option<&Path>,
    base_dir: &Path,
    field: &str,
) -> Result<Option<Vec<u8>>, AppError> {
    if let Some(data) = data.filter(|d| !d.trim().is_empty()) {
        let compact: String = data.split_whitespace().collect();
        return BASE64
            .decode(compact)
            .map(Some)
            .map_err(|e| AppError::Kubeconfig(format!("{field}-data is not valid base64: {e}")));
    }
    if let Some(path) = file {
        let path = resolve_path(base_dir, path);
        return fs::read(&path).map(Some).map_err(|e| {
            AppError::Kubeconfig(format!("cannot read {field} {}: {e}", path.display()))
        });
    }
    Ok(None)
}

fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() { path.to_path_buf() } else { base_dir.join(path) }
}
