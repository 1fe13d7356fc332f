//! API models

pub mod deployments;
pub mod settings;
pub mod stacks;
pub mod user;

pub use deployments::{
    CreateDeploymentRequest, CreateDeploymentResponse, Deployment, DeploymentJob,
    DeploymentLogLine, DeploymentLogs, DeploymentStep, DeploymentSummary, Operation,
};
pub use settings::{
    AwsOidcContext, AzureOidcContext, DeploymentSettings, GcpOidcContext, GitContext,
    GitHubContext, OidcContext, OperationContext, SourceContext,
};
pub use stacks::{CreateStackRequest, DeploymentV3, ResourceV3, UntypedDeployment};
pub use user::{GetUserResponse, OrganizationSummary};
