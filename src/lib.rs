//! serpent: a snake game where every food pellet is a live Kubernetes resource.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use app::{AppContext, commands::targets};

pub use app::session::{SessionOptions, SessionSummary};
pub use domain::{AppError, GameConfig, NamespaceFilter, ResourceInfo, ResourceKind};

/// List the resources the game could currently feed to the snake.
///
/// Uses the same config, kubeconfig and context resolution as the CLI.
pub fn targets(
    config: Option<&Path>,
    kubeconfig: Option<&Path>,
    context: Option<&str>,
) -> Result<Vec<ResourceInfo>, AppError> {
    let ctx = AppContext::connect(config, kubeconfig, context)?;
    targets::execute(&ctx)
}
