//! HTTP client implementation

use reqwest::{header, Client, Method, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};
use url::Url;

use crate::app::options::ApiOptions;
use crate::errors::{ApiError, DriverError};

/// HTTP client for the Pulumi Cloud REST API
pub struct HttpClient {
    client: Client,
    base_url: Url,
    token: SecretString,
}

impl HttpClient {
    /// Create a new HTTP client
    pub fn new(options: &ApiOptions) -> Result<Self, DriverError> {
        let client = Client::builder()
            .timeout(options.timeout)
            .build()
            .map_err(|e| DriverError::ConfigError(format!("building HTTP client: {}", e)))?;

        let base_url = Url::parse(&options.base_url)
            .map_err(|e| DriverError::ConfigError(format!("invalid API URL '{}': {}", options.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(DriverError::ConfigError(format!(
                "invalid API URL '{}': not a base URL",
                options.base_url
            )));
        }

        Ok(Self {
            client,
            base_url,
            token: options.token.clone(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// URL of the API path made of `segments`, each escaped individually
    pub fn url<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Start an authenticated request
    pub(crate) fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!("{} {}", method, url);

        self.client
            .request(method, url)
            .header(
                header::AUTHORIZATION,
                format!("token {}", self.token.expose_secret()),
            )
            .header(header::ACCEPT, "application/json")
    }

    /// Send a request, leaving status handling to the caller
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        Ok(request.send().await?)
    }
}

/// Turn a response with an unmodeled status code into an error
pub(crate) async fn unexpected(response: Response) -> ApiError {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    error!("HTTP {} failed: {} - {}", url, status, body);
    ApiError::UnexpectedResponse { status, body }
}
