//! Deployment models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::settings::DeploymentSettings;

/// Pulumi operation run by a deployment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Preview,
    Update,
    Refresh,
    Destroy,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Preview => "preview",
            Operation::Update => "update",
            Operation::Refresh => "refresh",
            Operation::Destroy => "destroy",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preview" => Ok(Operation::Preview),
            "update" | "up" => Ok(Operation::Update),
            "refresh" => Ok(Operation::Refresh),
            "destroy" => Ok(Operation::Destroy),
            _ => Err(format!("Invalid operation: {}", s)),
        }
    }
}

/// Body of a "create deployment" request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeploymentRequest {
    /// Settings for this deployment. Merged with the stack's saved settings
    /// when `inherit_settings` is set, used literally otherwise.
    #[serde(flatten)]
    pub settings: DeploymentSettings,

    pub inherit_settings: bool,

    pub operation: Operation,
}

impl CreateDeploymentRequest {
    /// Run `operation` with the stack's saved settings
    pub fn inherited(operation: Operation) -> Self {
        Self {
            settings: DeploymentSettings::default(),
            inherit_settings: true,
            operation,
        }
    }
}

/// Body of an accepted "create deployment" response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeploymentResponse {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub console_url: Option<String>,

    #[serde(default)]
    pub version: u64,
}

/// Entry of a deployments listing page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentSummary {
    /// Status of the deployment, e.g. "not-started", "running", "succeeded"
    pub status: String,
}

/// A single deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub version: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,

    #[serde(default)]
    pub jobs: Vec<DeploymentJob>,
}

/// A job of a deployment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentJob {
    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub steps: Vec<DeploymentStep>,
}

/// A step of a deployment job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentStep {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub status: String,
}

/// A page of step logs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentLogs {
    #[serde(default)]
    pub lines: Vec<DeploymentLogLine>,

    /// Offset to request the following lines from; absent once the step has finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeploymentLogLine {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,

    #[serde(default)]
    pub timestamp: String,

    #[serde(default)]
    pub line: String,
}
