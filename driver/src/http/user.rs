//! Current user API client

use openapi_client::models::GetUserResponse;
use reqwest::{Method, StatusCode};

use crate::errors::ApiError;
use crate::http::client::{unexpected, HttpClient};

impl HttpClient {
    /// Names of the organizations the token's user belongs to
    pub async fn get_current_user_organizations(&self) -> Result<Vec<String>, ApiError> {
        let url = self.url(["user"]);

        let response = self.send(self.request(Method::GET, url)).await?;
        if response.status() != StatusCode::OK {
            return Err(unexpected(response).await);
        }

        let body: GetUserResponse = response.json().await?;
        Ok(body
            .organizations
            .into_iter()
            .map(|org| org.github_login)
            .collect())
    }
}
