//! Site lifecycle controller
//!
//! Each site is backed by one stack named after the site. Every operation is
//! a short sequential chain of API calls; no state is kept between calls and
//! nothing is retried or rolled back.

use std::sync::Arc;

use openapi_client::models::{
    AwsOidcContext, CreateDeploymentRequest, DeploymentSettings, GitContext, GitHubContext,
    OidcContext, Operation, OperationContext, SourceContext,
};
use openapi_server::models::{SiteResponse, SiteStatus};
use tracing::{info, warn};

use crate::app::options::ProgramOptions;
use crate::errors::{ApiError, SiteError};
use crate::http::DeploymentApi;
use crate::models::scope::{ProjectScope, StackScope};
use crate::sites::lifecycle::{SiteEvent, SiteLifecycle};
use crate::sites::status::{current_deployment_status, site_status};
use crate::state::export::stack_outputs;

/// Environment variable carrying the site's index.html to the program
pub const SITE_CONTENT_VAR: &str = "SITE_CONTENT";

/// Environment variable carrying the AWS region to the program
pub const AWS_REGION_VAR: &str = "AWS_REGION";

/// Stack output holding the site's URL
pub const WEBSITE_URL_OUTPUT: &str = "websiteUrl";

const MAX_SITE_ID_LEN: usize = 100;

/// Result of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteDeletion {
    /// A destroy deployment was queued; the stack remains
    Destroying,

    /// The stack was removed
    Removed,
}

/// Maps site CRUD operations onto stack and deployment operations
pub struct SiteController {
    api: Arc<dyn DeploymentApi>,
    project: ProjectScope,
    program: ProgramOptions,
}

impl SiteController {
    pub fn new(api: Arc<dyn DeploymentApi>, project: ProjectScope, program: ProgramOptions) -> Self {
        Self {
            api,
            project,
            program,
        }
    }

    pub fn project(&self) -> &ProjectScope {
        &self.project
    }

    fn stack(&self, id: &str) -> StackScope {
        self.project.stack(id)
    }

    /// Deployment settings applied to every new site stack
    pub fn deployment_settings(&self) -> DeploymentSettings {
        let program = &self.program;
        let dir = program.dir.trim_matches('/');

        // Without a directory every push to the branch triggers a deployment.
        let paths = if dir.is_empty() {
            Vec::new()
        } else {
            vec![format!("{}/**", dir)]
        };

        DeploymentSettings {
            source_context: Some(SourceContext {
                git: GitContext {
                    repo_url: None,
                    branch: Some(program.branch.clone()).filter(|b| !b.is_empty()),
                    repo_dir: Some(dir.to_string()).filter(|d| !d.is_empty()),
                },
            }),
            operation_context: Some(OperationContext {
                environment: [(AWS_REGION_VAR.to_string(), program.region.clone())].into(),
                oidc: Some(OidcContext {
                    aws: Some(AwsOidcContext {
                        role_arn: program.role_arn.clone(),
                        session_name: program.session_name.clone(),
                    }),
                    ..Default::default()
                }),
            }),
            github: Some(GitHubContext {
                repository: program.repository.clone(),
                paths,
                deploy_commits: Some(true),
                preview_pull_requests: None,
            }),
        }
    }

    async fn deploy_content(&self, stack: &StackScope, content: &str) -> Result<(), ApiError> {
        let mut request = CreateDeploymentRequest::inherited(Operation::Update);
        request.settings.operation_context =
            Some(OperationContext::with_environment([(SITE_CONTENT_VAR, content)]));

        let accepted = self.api.create_deployment(stack, &request).await?;
        info!("Queued update deployment '{}' for {}", accepted.id, stack);
        Ok(())
    }

    /// Create a site: create its stack, configure deployments, and queue the
    /// initial update.
    ///
    /// A failure after the stack exists leaves the stack in place; the error
    /// reports the state the site was left in.
    pub async fn create(&self, id: &str, content: &str) -> Result<SiteResponse, SiteError> {
        validate_site_id(id)?;
        let stack = self.stack(id);
        let mut lifecycle = SiteLifecycle::new();
        lifecycle.process(SiteEvent::Create)?;

        match self.api.create_stack(&stack).await {
            Ok(()) => {}
            Err(ApiError::AlreadyExists) => return Err(SiteError::AlreadyExists(id.to_string())),
            Err(source) => {
                return Err(SiteError::Api {
                    context: "creating stack",
                    source,
                })
            }
        }
        lifecycle.process(SiteEvent::StackCreated)?;
        info!("Created stack {}", stack);

        let incomplete = |lifecycle: &SiteLifecycle, source: ApiError| {
            warn!("Site '{}' left in {} state", id, lifecycle.state());
            SiteError::Incomplete {
                id: id.to_string(),
                state: lifecycle.state(),
                source,
            }
        };

        self.api
            .patch_deployment_settings(&stack, &self.deployment_settings())
            .await
            .map_err(|e| incomplete(&lifecycle, e))?;
        lifecycle.process(SiteEvent::SettingsPatched)?;

        self.deploy_content(&stack, content)
            .await
            .map_err(|e| incomplete(&lifecycle, e))?;

        Ok(SiteResponse::id_only(id))
    }

    /// Get a site's status and URL
    pub async fn get(&self, id: &str) -> Result<SiteResponse, SiteError> {
        let stack = self.stack(id);

        let status = current_deployment_status(self.api.as_ref(), &stack)
            .await
            .map_err(|e| SiteError::from_api(id, "getting stack", e))?
            .map(|s| site_status(&s))
            .unwrap_or(SiteStatus::Ready);

        let envelope = self
            .api
            .get_stack_export(&stack)
            .await
            .map_err(|e| SiteError::from_api(id, "getting stack outputs", e))?;
        let outputs = stack_outputs(envelope)
            .map_err(|e| SiteError::from_api(id, "getting stack outputs", e))?;

        let url = outputs
            .as_ref()
            .and_then(|o| o.get(WEBSITE_URL_OUTPUT))
            .and_then(|v| v.as_str())
            .map(str::to_string);

        Ok(SiteResponse {
            id: id.to_string(),
            url,
            status: Some(status),
        })
    }

    /// Queue a deployment of new site content
    pub async fn update(&self, id: &str, content: &str) -> Result<(), SiteError> {
        self.deploy_content(&self.stack(id), content)
            .await
            .map_err(|e| SiteError::from_api(id, "starting deployment", e))
    }

    /// Destroy a site's resources, or with `purge` remove its stack
    pub async fn delete(&self, id: &str, purge: bool) -> Result<SiteDeletion, SiteError> {
        let stack = self.stack(id);

        if purge {
            self.api
                .delete_stack(&stack)
                .await
                .map_err(|e| SiteError::from_api(id, "deleting stack", e))?;
            info!("Removed stack {}", stack);
            return Ok(SiteDeletion::Removed);
        }

        let request = CreateDeploymentRequest::inherited(Operation::Destroy);
        let accepted = self
            .api
            .create_deployment(&stack, &request)
            .await
            .map_err(|e| SiteError::from_api(id, "starting deployment", e))?;
        info!("Queued destroy deployment '{}' for {}", accepted.id, stack);
        Ok(SiteDeletion::Destroying)
    }
}

/// Check that `id` is usable as a stack name
pub fn validate_site_id(id: &str) -> Result<(), SiteError> {
    let valid = !id.is_empty()
        && id.len() <= MAX_SITE_ID_LEN
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid {
        Ok(())
    } else {
        Err(SiteError::InvalidId(id.to_string()))
    }
}
