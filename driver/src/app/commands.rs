//! One-shot deployment commands

use colored::{ColoredString, Colorize};
use openapi_client::models::{
    CreateDeploymentRequest, CreateDeploymentResponse, Deployment, DeploymentLogs,
    DeploymentSettings, GitContext, Operation, SourceContext,
};
use tracing::info;

use crate::errors::{ApiError, DriverError};
use crate::http::DeploymentApi;
use crate::models::scope::StackScope;

/// Options of a deployment request
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub operation: Operation,

    /// Clone URL of the program repository
    pub repo_url: Option<String>,

    pub branch: Option<String>,

    /// Subdirectory holding the program
    pub repo_dir: Option<String>,

    /// Merge with the stack's saved settings
    pub inherit_settings: bool,

    /// Create the stack and retry once if it does not exist
    pub create_stack: bool,
}

impl RequestOptions {
    fn deployment_request(&self) -> CreateDeploymentRequest {
        let git = GitContext {
            repo_url: self.repo_url.clone(),
            branch: self.branch.clone(),
            repo_dir: self.repo_dir.clone(),
        };
        let source_context = (git != GitContext::default()).then_some(SourceContext { git });

        CreateDeploymentRequest {
            settings: DeploymentSettings {
                source_context,
                ..Default::default()
            },
            inherit_settings: self.inherit_settings,
            operation: self.operation,
        }
    }
}

/// Queue a deployment for a stack
pub async fn request_deployment(
    api: &dyn DeploymentApi,
    scope: &StackScope,
    options: &RequestOptions,
) -> Result<CreateDeploymentResponse, DriverError> {
    let request = options.deployment_request();
    info!("Attempting a {} against {}", request.operation, scope);

    match api.create_deployment(scope, &request).await {
        Err(ApiError::NotFound) if options.create_stack => {
            info!("Stack {} doesn't exist, creating it", scope);
            match api.create_stack(scope).await {
                Ok(()) | Err(ApiError::AlreadyExists) => {}
                Err(e) => return Err(e.into()),
            }
            Ok(api.create_deployment(scope, &request).await?)
        }
        result => Ok(result?),
    }
}

fn colored_status(status: &str) -> ColoredString {
    match status {
        "succeeded" => status.green(),
        "failed" => status.red(),
        "not-started" | "accepted" | "running" => status.yellow(),
        _ => status.normal(),
    }
}

/// Render an accepted deployment request
pub fn format_accepted(response: &CreateDeploymentResponse) -> String {
    let mut out = format!("Deployment successfully created.\nDeployment ID: {}", response.id);
    if let Some(url) = &response.console_url {
        out.push_str(&format!("\nConsole link: {}", url));
    }
    out
}

/// Render a deployment and its steps
pub fn format_deployment(deployment: &Deployment) -> String {
    let mut out = format!(
        "Deployment {} (version {}): {}",
        deployment.id,
        deployment.version,
        colored_status(&deployment.status)
    );
    if let Some(created) = &deployment.created {
        out.push_str(&format!("\n  created:  {}", created));
    }
    if let Some(modified) = &deployment.modified {
        out.push_str(&format!("\n  modified: {}", modified));
    }

    let mut step = 0;
    for job in &deployment.jobs {
        for s in &job.steps {
            step += 1;
            out.push_str(&format!("\n  step {}: {} [{}]", step, s.name, colored_status(&s.status)));
        }
    }
    out
}

/// Render a page of step logs
pub fn format_logs(logs: &DeploymentLogs) -> String {
    let mut out = String::new();
    for line in &logs.lines {
        if let Some(header) = &line.header {
            out.push_str(&format!("{}\n", header.bold()));
        }
        out.push_str(&format!("{} {}\n", line.timestamp.dimmed(), line.line));
    }
    if let Some(next) = logs.next_offset {
        out.push_str(&format!("next offset: {}\n", next));
    }
    out
}
