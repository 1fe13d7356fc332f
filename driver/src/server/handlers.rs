//! HTTP request handlers

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use openapi_server::models::{
    CreateSiteRequest, HealthResponse, UpdateSiteRequest, VersionResponse,
};
use tracing::{error, info};

use crate::errors::SiteError;
use crate::server::state::ServerState;
use crate::sites::controller::SiteDeletion;
use crate::utils::version_info;

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        match self {
            SiteError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
            SiteError::AlreadyExists(_) => (StatusCode::CONFLICT, self.to_string()).into_response(),
            SiteError::InvalidId(_) => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            err => {
                error!("Internal Server Error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}

fn bad_request(message: &'static str, rejection: JsonRejection) -> Response {
    info!("{}: {}", message, rejection.body_text());
    (StatusCode::BAD_REQUEST, message).into_response()
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    let version = version_info();
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "site-driver".to_string(),
        version: version.version,
    })
}

/// Version handler
pub async fn version_handler() -> impl IntoResponse {
    let version = version_info();
    Json(VersionResponse {
        version: version.version,
        git_hash: version.git_hash,
        build_time: version.build_time,
    })
}

/// Create site handler
pub async fn create_site_handler(
    State(state): State<Arc<ServerState>>,
    payload: Result<Json<CreateSiteRequest>, JsonRejection>,
) -> Result<Response, SiteError> {
    let Json(create) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Ok(bad_request("failed to parse create request", rejection)),
    };

    info!("Creating site '{}'", create.id);
    let site = state.sites.create(&create.id, &create.content).await?;
    Ok((StatusCode::ACCEPTED, Json(site)).into_response())
}

/// Get site handler
pub async fn get_site_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
) -> Result<Response, SiteError> {
    let site = state.sites.get(&id).await?;
    Ok(Json(site).into_response())
}

/// Update site handler
pub async fn update_site_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateSiteRequest>, JsonRejection>,
) -> Result<Response, SiteError> {
    let Json(update) = match payload {
        Ok(payload) => payload,
        Err(rejection) => return Ok(bad_request("failed to parse update request", rejection)),
    };

    info!("Updating site '{}'", id);
    state.sites.update(&id, &update.content).await?;
    Ok(StatusCode::ACCEPTED.into_response())
}

/// Delete site handler. Without `rm` the site's resources are destroyed;
/// with `rm` its stack is removed.
pub async fn delete_site_handler(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, SiteError> {
    let purge = params.contains_key("rm");

    info!("Deleting site '{}' (purge: {})", id, purge);
    let status = match state.sites.delete(&id, purge).await? {
        SiteDeletion::Destroying => StatusCode::ACCEPTED,
        SiteDeletion::Removed => StatusCode::OK,
    };
    Ok(status.into_response())
}
