//! Deployment API client

use openapi_client::models::{
    CreateDeploymentRequest, CreateDeploymentResponse, Deployment, DeploymentLogs,
    DeploymentSettings, DeploymentSummary,
};
use reqwest::{Method, StatusCode};
use tracing::debug;
use url::Url;

use crate::errors::ApiError;
use crate::http::client::{unexpected, HttpClient};
use crate::models::scope::StackScope;

impl HttpClient {
    /// URL below `/preview/{org}/{project}/{stack}`
    fn preview_url(&self, scope: &StackScope, tail: &[&str]) -> Url {
        let mut segments = vec!["preview"];
        segments.extend(scope.segments());
        segments.extend_from_slice(tail);
        self.url(segments)
    }

    /// Merge settings into the stack's deployment settings
    pub async fn patch_deployment_settings(
        &self,
        scope: &StackScope,
        settings: &DeploymentSettings,
    ) -> Result<(), ApiError> {
        let url = self.preview_url(scope, &["deployment", "settings"]);

        let response = self.send(self.request(Method::POST, url).json(settings)).await?;
        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            _ => Err(unexpected(response).await),
        }
    }

    /// Queue a deployment. The deployment runs asynchronously.
    pub async fn create_deployment(
        &self,
        scope: &StackScope,
        request: &CreateDeploymentRequest,
    ) -> Result<CreateDeploymentResponse, ApiError> {
        let url = self.preview_url(scope, &["deployments"]);

        let response = self.send(self.request(Method::POST, url).json(request)).await?;
        match response.status() {
            StatusCode::ACCEPTED => {}
            StatusCode::NOT_FOUND => return Err(ApiError::NotFound),
            _ => return Err(unexpected(response).await),
        }

        // The status alone signals acceptance; the body is informational.
        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(CreateDeploymentResponse::default());
        }
        Ok(serde_json::from_slice(&body).unwrap_or_else(|e| {
            debug!("Ignoring undecodable deployment response: {}", e);
            CreateDeploymentResponse::default()
        }))
    }

    /// List one page of the stack's deployments. Pages start at 1; a page
    /// past the last one is empty.
    pub async fn list_deployments(
        &self,
        scope: &StackScope,
        page: u32,
    ) -> Result<Vec<DeploymentSummary>, ApiError> {
        let mut url = self.preview_url(scope, &["deployments"]);
        url.query_pairs_mut().append_pair("page", &page.to_string());

        let response = self.send(self.request(Method::GET, url)).await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            _ => Err(unexpected(response).await),
        }
    }

    /// Get a single deployment
    pub async fn get_deployment(
        &self,
        scope: &StackScope,
        deployment_id: &str,
    ) -> Result<Deployment, ApiError> {
        let url = self.preview_url(scope, &["deployments", deployment_id]);

        let response = self.send(self.request(Method::GET, url)).await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            _ => Err(unexpected(response).await),
        }
    }

    /// Get the log lines of a deployment step, starting at `offset`
    pub async fn get_deployment_logs(
        &self,
        scope: &StackScope,
        deployment_id: &str,
        step: u32,
        offset: u64,
    ) -> Result<DeploymentLogs, ApiError> {
        let mut url = self.preview_url(scope, &["deployments", deployment_id, "logs"]);
        url.query_pairs_mut()
            .append_pair("step", &step.to_string())
            .append_pair("offset", &offset.to_string());

        let response = self.send(self.request(Method::GET, url)).await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            _ => Err(unexpected(response).await),
        }
    }
}
