//! Stack API client

use openapi_client::models::{CreateStackRequest, UntypedDeployment};
use reqwest::{Method, StatusCode};

use crate::errors::ApiError;
use crate::http::client::{unexpected, HttpClient};
use crate::models::scope::StackScope;

impl HttpClient {
    /// Create a stack
    pub async fn create_stack(&self, scope: &StackScope) -> Result<(), ApiError> {
        let url = self.url(["stacks", scope.organization.as_str(), scope.project.as_str()]);
        let body = CreateStackRequest {
            stack_name: scope.stack.clone(),
        };

        let response = self.send(self.request(Method::POST, url).json(&body)).await?;
        match response.status() {
            s if s.is_success() => Ok(()),
            StatusCode::CONFLICT => Err(ApiError::AlreadyExists),
            _ => Err(unexpected(response).await),
        }
    }

    /// Delete a stack
    pub async fn delete_stack(&self, scope: &StackScope) -> Result<(), ApiError> {
        let mut segments = vec!["stacks"];
        segments.extend(scope.segments());
        let url = self.url(segments);

        let response = self.send(self.request(Method::DELETE, url)).await?;
        match response.status() {
            StatusCode::NO_CONTENT => Ok(()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            _ => Err(unexpected(response).await),
        }
    }

    /// Export the stack's latest deployment state
    pub async fn get_stack_export(&self, scope: &StackScope) -> Result<UntypedDeployment, ApiError> {
        let mut segments = vec!["stacks"];
        segments.extend(scope.segments());
        segments.push("export");
        let url = self.url(segments);

        let response = self.send(self.request(Method::GET, url)).await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            _ => Err(unexpected(response).await),
        }
    }
}
