//! Pulumi Cloud API bindings

pub mod client;
pub mod deployments;
pub mod stacks;
pub mod user;

use async_trait::async_trait;
use openapi_client::models::{
    CreateDeploymentRequest, CreateDeploymentResponse, Deployment, DeploymentLogs,
    DeploymentSettings, DeploymentSummary, UntypedDeployment,
};

use crate::errors::ApiError;
use crate::http::client::HttpClient;
use crate::models::scope::StackScope;

/// Stack and deployment operations of the remote service, for testability
#[async_trait]
pub trait DeploymentApi: Send + Sync {
    /// Create a stack; `AlreadyExists` on a name collision
    async fn create_stack(&self, scope: &StackScope) -> Result<(), ApiError>;

    /// Delete a stack
    async fn delete_stack(&self, scope: &StackScope) -> Result<(), ApiError>;

    /// Merge settings into the stack's deployment settings
    async fn patch_deployment_settings(
        &self,
        scope: &StackScope,
        settings: &DeploymentSettings,
    ) -> Result<(), ApiError>;

    /// Queue a deployment
    async fn create_deployment(
        &self,
        scope: &StackScope,
        request: &CreateDeploymentRequest,
    ) -> Result<CreateDeploymentResponse, ApiError>;

    /// List a page of deployments, oldest first; empty past the last page
    async fn list_deployments(
        &self,
        scope: &StackScope,
        page: u32,
    ) -> Result<Vec<DeploymentSummary>, ApiError>;

    /// Export the stack's state envelope
    async fn get_stack_export(&self, scope: &StackScope) -> Result<UntypedDeployment, ApiError>;

    /// Get a single deployment
    async fn get_deployment(
        &self,
        scope: &StackScope,
        deployment_id: &str,
    ) -> Result<Deployment, ApiError>;

    /// Get a page of step logs
    async fn get_deployment_logs(
        &self,
        scope: &StackScope,
        deployment_id: &str,
        step: u32,
        offset: u64,
    ) -> Result<DeploymentLogs, ApiError>;

    /// Organizations of the current user
    async fn get_current_user_organizations(&self) -> Result<Vec<String>, ApiError>;
}

#[async_trait]
impl DeploymentApi for HttpClient {
    async fn create_stack(&self, scope: &StackScope) -> Result<(), ApiError> {
        HttpClient::create_stack(self, scope).await
    }

    async fn delete_stack(&self, scope: &StackScope) -> Result<(), ApiError> {
        HttpClient::delete_stack(self, scope).await
    }

    async fn patch_deployment_settings(
        &self,
        scope: &StackScope,
        settings: &DeploymentSettings,
    ) -> Result<(), ApiError> {
        HttpClient::patch_deployment_settings(self, scope, settings).await
    }

    async fn create_deployment(
        &self,
        scope: &StackScope,
        request: &CreateDeploymentRequest,
    ) -> Result<CreateDeploymentResponse, ApiError> {
        HttpClient::create_deployment(self, scope, request).await
    }

    async fn list_deployments(
        &self,
        scope: &StackScope,
        page: u32,
    ) -> Result<Vec<DeploymentSummary>, ApiError> {
        HttpClient::list_deployments(self, scope, page).await
    }

    async fn get_stack_export(&self, scope: &StackScope) -> Result<UntypedDeployment, ApiError> {
        HttpClient::get_stack_export(self, scope).await
    }

    async fn get_deployment(
        &self,
        scope: &StackScope,
        deployment_id: &str,
    ) -> Result<Deployment, ApiError> {
        HttpClient::get_deployment(self, scope, deployment_id).await
    }

    async fn get_deployment_logs(
        &self,
        scope: &StackScope,
        deployment_id: &str,
        step: u32,
        offset: u64,
    ) -> Result<DeploymentLogs, ApiError> {
        HttpClient::get_deployment_logs(self, scope, deployment_id, step, offset).await
    }

    async fn get_current_user_organizations(&self) -> Result<Vec<String>, ApiError> {
        HttpClient::get_current_user_organizations(self).await
    }
}
