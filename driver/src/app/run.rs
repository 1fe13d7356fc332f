//! Main application run loop

use std::future::Future;
use std::sync::Arc;

use tracing::{error, info};

use crate::app::options::AppOptions;
use crate::errors::DriverError;
use crate::http::DeploymentApi;
use crate::models::scope::ProjectScope;
use crate::server::serve::serve;
use crate::server::state::ServerState;
use crate::sites::controller::SiteController;

/// Run the site server until `shutdown_signal` resolves
pub async fn run(
    options: AppOptions,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DriverError> {
    info!("Initializing site driver...");
    options.validate()?;

    let api: Arc<dyn DeploymentApi> = Arc::new(options.api.client()?);
    let organization = resolve_organization(api.as_ref(), options.organization.as_deref()).await?;
    let project = ProjectScope::new(organization, options.project.clone());
    info!(
        "Serving sites from {}/{} (program {}@{}, dir '{}')",
        project.organization,
        project.project,
        options.program.repository,
        options.program.branch,
        options.program.dir
    );

    let sites = Arc::new(SiteController::new(api, project, options.program.clone()));
    let state = Arc::new(ServerState::new(sites));

    let handle = serve(&options.server, state, shutdown_signal).await?;
    match handle.await {
        Ok(result) => {
            info!("Site server stopped");
            result
        }
        Err(e) => {
            error!("Site server task failed: {}", e);
            Err(DriverError::ServerError(e.to_string()))
        }
    }
}

/// Use `explicit` when given, otherwise the current user's first organization
pub async fn resolve_organization(
    api: &dyn DeploymentApi,
    explicit: Option<&str>,
) -> Result<String, DriverError> {
    if let Some(org) = explicit.filter(|o| !o.is_empty()) {
        return Ok(org.to_string());
    }

    let orgs = api.get_current_user_organizations().await?;
    match orgs.into_iter().next() {
        Some(org) => {
            info!("Using default organization '{}'", org);
            Ok(org)
        }
        None => Err(DriverError::ConfigError(
            "no organization given and the current user belongs to none".to_string(),
        )),
    }
}
