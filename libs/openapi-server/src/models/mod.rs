//! API models

use serde::{Deserialize, Serialize};

/// Body of a "create site" request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSiteRequest {
    /// Name of the site, also the name of its stack
    pub id: String,

    /// Content of the site's index.html
    pub content: String,
}

/// Body of an "update site" request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSiteRequest {
    /// Content of the site's index.html
    pub content: String,
}

/// Simplified site status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SiteStatus {
    /// A deployment is queued or running
    Deploying,
    /// No deployment is in flight
    Ready,
}

/// Body of a "create site" or "get site" response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteResponse {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<SiteStatus>,
}

impl SiteResponse {
    /// Response carrying only the site id
    pub fn id_only(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: None,
            status: None,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Version response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionResponse {
    pub version: String,
    pub git_hash: String,
    pub build_time: String,
}
