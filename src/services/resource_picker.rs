//! Random selection of eligible cluster resources.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::domain::{AppError, GameConfig, ResourceInfo};
use crate::ports::ClusterClient;

/// Every eligible resource allowed by `config`.
///
/// Namespaces are listed once; a namespace whose listing fails is logged
/// and skipped so one forbidden namespace does not stop the game.
pub fn eligible_resources<C>(client: &C, config: &GameConfig) -> Result<Vec<ResourceInfo>, AppError>
where
    C: ClusterClient + ?Sized,
{
    if config.resource_types.is_empty() {
        return Err(AppError::NoResourceTypes);
    }

    let namespaces: Vec<String> = client
        .list_namespaces()?
        .into_iter()
        .filter(|namespace| config.namespaces.allows(namespace))
        .collect();

    let mut resources = Vec::new();
    for kind in &config.resource_types {
        for namespace in &namespaces {
            match client.list_resources(*kind, namespace) {
                Ok(found) => resources.extend(found),
                Err(err) => {
                    tracing::warn!(
                        "Error listing {} in namespace {namespace}: {err}",
                        kind.config_name()
                    );
                }
            }
        }
    }

    if resources.is_empty() {
        tracing::info!("No eligible resources found.");
        return Err(AppError::NoEligibleResources);
    }
    Ok(resources)
}

/// One eligible resource chosen uniformly at random.
pub fn pick_random_resource<C, R>(
    client: &C,
    config: &GameConfig,
    rng: &mut R,
) -> Result<ResourceInfo, AppError>
where
    C: ClusterClient + ?Sized,
    R: Rng + ?Sized,
{
    let resources = eligible_resources(client, config)?;
    resources.choose(rng).cloned().ok_or(AppError::NoEligibleResources)
}
