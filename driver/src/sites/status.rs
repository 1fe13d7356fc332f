//! Site status derivation

use openapi_server::models::SiteStatus;
use tracing::debug;

use crate::errors::ApiError;
use crate::http::DeploymentApi;
use crate::models::scope::StackScope;

/// Map a deployment status to a site status. Deployments that have not
/// finished mean the site is deploying; any other status means ready.
pub fn site_status(deployment_status: &str) -> SiteStatus {
    match deployment_status {
        "not-started" | "accepted" | "running" => SiteStatus::Deploying,
        _ => SiteStatus::Ready,
    }
}

/// Status of the stack's most recent deployment.
///
/// Walks the deployment pages from 1 until an empty page comes back and keeps
/// the status of the last deployment seen. `None` when the stack has never
/// been deployed.
pub async fn current_deployment_status(
    api: &dyn DeploymentApi,
    scope: &StackScope,
) -> Result<Option<String>, ApiError> {
    let mut last_status = None;
    let mut page = 1;
    loop {
        let deployments = api.list_deployments(scope, page).await?;
        match deployments.into_iter().last() {
            Some(deployment) => last_status = Some(deployment.status),
            None => {
                debug!("{}: {} deployment page(s), last status {:?}", scope, page - 1, last_status);
                return Ok(last_status);
            }
        }
        page += 1;
    }
}
