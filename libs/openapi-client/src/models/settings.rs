//! Deployment settings models
//!
//! Settings are merged additively by the service, so every sub-document is
//! optional and absent or empty fields are left out of the encoded body.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Settings payload for a stack's deployments
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_context: Option<SourceContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_context: Option<OperationContext>,

    #[serde(default, rename = "gitHub", skip_serializing_if = "Option::is_none")]
    pub github: Option<GitHubContext>,
}

impl DeploymentSettings {
    /// True when no sub-document is set
    pub fn is_empty(&self) -> bool {
        self.source_context.is_none() && self.operation_context.is_none() && self.github.is_none()
    }
}

/// Source control configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceContext {
    pub git: GitContext,
}

/// Git location of the Pulumi program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitContext {
    /// Clone URL; only needed when the stack has no GitHub integration
    #[serde(default, rename = "repoURL", skip_serializing_if = "Option::is_none")]
    pub repo_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Subdirectory holding the program
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_dir: Option<String>,
}

/// Operation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationContext {
    #[serde(
        default,
        rename = "environmentVariables",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub environment: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oidc: Option<OidcContext>,
}

impl OperationContext {
    /// Operation context carrying only environment variables
    pub fn with_environment<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            environment: vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            oidc: None,
        }
    }
}

/// OIDC credential exchange, one entry per cloud provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OidcContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<AwsOidcContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzureOidcContext>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcp: Option<GcpOidcContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsOidcContext {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub role_arn: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub session_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureOidcContext {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub client_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tenant_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub subscription_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcpOidcContext {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub workload_pool_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub provider_id: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub service_account: String,
}

/// GitHub trigger configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitHubContext {
    /// Repository slug, e.g. "pulumi/deploy-demos"
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repository: String,

    /// Path filters; no filters means any change triggers a run
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub paths: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deploy_commits: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_pull_requests: Option<bool>,
}
