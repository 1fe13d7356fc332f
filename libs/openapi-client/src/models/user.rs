//! Current user models

use serde::{Deserialize, Serialize};

/// Body of a "get current user" response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GetUserResponse {
    #[serde(default)]
    pub organizations: Vec<OrganizationSummary>,
}

/// Organization the user belongs to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSummary {
    /// Short name of the organization, e.g. "pulumi"
    pub github_login: String,
}
