//! Application configuration options

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use crate::errors::DriverError;
use crate::http::client::HttpClient;

/// Default Pulumi Cloud API base URL
pub const PULUMI_API_URL: &str = "https://api.pulumi.com/api";

/// Main application options, built once at startup
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Pulumi Cloud API options
    pub api: ApiOptions,

    /// Organization holding the site stacks; the user's first organization when unset
    pub organization: Option<String>,

    /// Project holding the site stacks
    pub project: String,

    /// Program deployed for each site
    pub program: ProgramOptions,

    /// Server configuration
    pub server: ServerOptions,
}

impl AppOptions {
    /// Check the options required to serve sites
    pub fn validate(&self) -> Result<(), DriverError> {
        let required = [
            ("token", self.api.token.expose_secret().is_empty()),
            ("project", self.project.is_empty()),
            ("repository", self.program.repository.is_empty()),
            ("role ARN", self.program.role_arn.is_empty()),
        ];
        match required.iter().find(|(_, missing)| *missing) {
            Some((name, _)) => Err(DriverError::ConfigError(format!("the {} is required", name))),
            None => Ok(()),
        }
    }
}

/// Pulumi Cloud API client options
#[derive(Debug, Clone)]
pub struct ApiOptions {
    /// API base URL
    pub base_url: String,

    /// Access token
    pub token: SecretString,

    /// Timeout of a single API request
    pub timeout: Duration,
}

impl ApiOptions {
    pub fn new(token: SecretString) -> Self {
        Self {
            base_url: PULUMI_API_URL.to_string(),
            token,
            timeout: Duration::from_secs(30),
        }
    }

    /// Build a client from these options
    pub fn client(&self) -> Result<HttpClient, DriverError> {
        HttpClient::new(self)
    }
}

/// Location of the Pulumi program that manages each site's resources, and
/// the credentials its deployments use
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramOptions {
    /// GitHub repository slug holding the program
    pub repository: String,

    /// Git branch holding the program
    pub branch: String,

    /// Subdirectory holding the program; empty for the repository root
    pub dir: String,

    /// AWS region to deploy to
    pub region: String,

    /// AWS IAM role assumed via OIDC
    pub role_arn: String,

    /// Session name used for the OIDC role
    pub session_name: String,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            repository: String::new(),
            branch: "main".to_string(),
            dir: String::new(),
            region: "us-west-2".to_string(),
            role_arn: String::new(),
            session_name: "site-deploy".to_string(),
        }
    }
}

/// HTTP server options
#[derive(Debug, Clone)]
pub struct ServerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,
}

impl ServerOptions {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}
