//! HTTP server setup

use std::future::Future;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::app::options::ServerOptions;
use crate::errors::DriverError;
use crate::server::handlers::{
    create_site_handler, delete_site_handler, get_site_handler, health_handler,
    update_site_handler, version_handler,
};
use crate::server::state::ServerState;

/// Build the site API router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        // Health and version
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        // Sites
        .route("/sites", post(create_site_handler))
        .route(
            "/sites/{id}",
            get(get_site_handler)
                .post(update_site_handler)
                .delete(delete_site_handler),
        )
        // State and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server
pub async fn serve(
    options: &ServerOptions,
    state: Arc<ServerState>,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<JoinHandle<Result<(), DriverError>>, DriverError> {
    let app = router(state);

    let addr = options.addr();
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| DriverError::ServerError(format!("binding {}: {}", addr, e)))?;

    let handle = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal)
            .await
            .map_err(|e| DriverError::ServerError(e.to_string()))
    });

    Ok(handle)
}
