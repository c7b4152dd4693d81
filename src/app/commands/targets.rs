//! Targets command implementation.

use crate::app::AppContext;
use crate::domain::{AppError, ResourceInfo};
use crate::services::eligible_resources;

/// Every resource food could currently be linked to, sorted and deduplicated.
/// A cluster with nothing eligible yields an empty list.
pub fn execute(ctx: &AppContext) -> Result<Vec<ResourceInfo>, AppError> {
    let mut resources = match eligible_resources(ctx.client().as_ref(), ctx.config()) {
        Ok(resources) => resources,
        Err(AppError::NoEligibleResources) => Vec::new(),
        Err(err) => return Err(err),
    };
    resources.sort();
    resources.dedup();
    Ok(resources)
}
