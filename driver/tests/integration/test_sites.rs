//! Site API tests, driving the router against the fake API

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use site_driver::app::options::ProgramOptions;
use site_driver::models::scope::ProjectScope;
use site_driver::server::serve::router;
use site_driver::server::state::ServerState;
use site_driver::sites::controller::SiteController;
use tower::ServiceExt;

use crate::fake_api::{FakeApi, FakeStack, BROKEN_STACK, TOKEN};
use crate::test_client::client_for;

async fn site_api() -> (FakeApi, Router) {
    let fake = FakeApi::start().await;
    let client = client_for(&fake.base_url, TOKEN);
    let program = ProgramOptions {
        repository: "acme/site-program".to_string(),
        dir: "app/".to_string(),
        role_arn: "arn:aws:iam::123456789012:role/deploy".to_string(),
        ..Default::default()
    };

    let sites = SiteController::new(Arc::new(client), ProjectScope::new("acme", "sites"), program);
    let app = router(Arc::new(ServerState::new(Arc::new(sites))));
    (fake, app)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (_fake, app) = site_api().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["service"], "site-driver");
}

#[tokio::test]
async fn test_create_site() {
    let (fake, app) = site_api().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/sites",
        Some(json!({"id": "s1", "content": "<html/>"})),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(serde_json::from_str::<Value>(&body).unwrap(), json!({"id": "s1"}));

    let stack = fake.stack("s1").unwrap();
    assert_eq!(stack.settings.len(), 1);
    assert_eq!(stack.settings[0]["gitHub"]["paths"], json!(["app/**"]));
    assert_eq!(stack.settings[0]["gitHub"]["repository"], "acme/site-program");
    assert!(stack.settings[0]["gitHub"].get("previewPullRequests").is_none());
    assert_eq!(stack.settings[0]["sourceContext"]["git"]["repoDir"], "app");
    assert_eq!(
        stack.settings[0]["operationContext"]["environmentVariables"]["AWS_REGION"],
        "us-west-2"
    );

    assert_eq!(
        stack.requests,
        vec![json!({
            "operationContext": {"environmentVariables": {"SITE_CONTENT": "<html/>"}},
            "inheritSettings": true,
            "operation": "update"
        })]
    );
}

#[tokio::test]
async fn test_create_existing_site_conflicts() {
    let (fake, app) = site_api().await;
    fake.seed_stack("s1", FakeStack::default());

    let (status, body) = send(
        &app,
        Method::POST,
        "/sites",
        Some(json!({"id": "s1", "content": "<html/>"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, "site already exists");

    // The existing stack is left untouched
    assert!(fake.stack("s1").unwrap().settings.is_empty());
}

#[tokio::test]
async fn test_create_rejects_bad_requests() {
    let (fake, app) = site_api().await;

    let (status, body) = send(&app, Method::POST, "/sites", Some(json!({"content": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "failed to parse create request");

    let (status, _) = send(
        &app,
        Method::POST,
        "/sites",
        Some(json!({"id": "no/slashes", "content": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(fake.requests().is_empty());
}

#[tokio::test]
async fn test_get_site() {
    let (fake, app) = site_api().await;
    fake.seed_stack(
        "s1",
        FakeStack {
            statuses: ["succeeded", "failed", "running"].map(String::from).to_vec(),
            export: Some(json!({
                "version": 3,
                "deployment": {
                    "resources": [{
                        "urn": "urn:pulumi:s1::sites::pulumi:pulumi:Stack::sites-s1",
                        "type": "pulumi:pulumi:Stack",
                        "outputs": {"websiteUrl": "http://s1.example.com"}
                    }]
                }
            })),
            ..Default::default()
        },
    );

    let (status, body) = send(&app, Method::GET, "/sites/s1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({"id": "s1", "url": "http://s1.example.com", "status": "DEPLOYING"})
    );
}

#[tokio::test]
async fn test_get_new_site_is_deploying_without_url() {
    let (_fake, app) = site_api().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/sites",
        Some(json!({"id": "s1", "content": "<html/>"})),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let (status, body) = send(&app, Method::GET, "/sites/s1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        serde_json::from_str::<Value>(&body).unwrap(),
        json!({"id": "s1", "status": "DEPLOYING"})
    );
}

#[tokio::test]
async fn test_get_missing_site() {
    let (_fake, app) = site_api().await;

    let (status, body) = send(&app, Method::GET, "/sites/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("nope"));
}

#[tokio::test]
async fn test_upstream_failure_is_internal_error() {
    let (fake, app) = site_api().await;
    fake.seed_stack(BROKEN_STACK, FakeStack::default());

    let (status, body) = send(&app, Method::GET, "/sites/broken", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
}

#[tokio::test]
async fn test_update_site() {
    let (fake, app) = site_api().await;
    fake.seed_stack("s1", FakeStack::default());

    let (status, _) = send(
        &app,
        Method::POST,
        "/sites/s1",
        Some(json!({"content": "<h1>v2</h1>"})),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let stack = fake.stack("s1").unwrap();
    assert_eq!(
        stack.requests[0]["operationContext"]["environmentVariables"]["SITE_CONTENT"],
        "<h1>v2</h1>"
    );

    let (status, _) = send(&app, Method::POST, "/sites/nope", Some(json!({"content": "x"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, Method::POST, "/sites/s1", Some(json!({"html": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, "failed to parse update request");
}

#[tokio::test]
async fn test_delete_site_destroys_then_removes() {
    let (fake, app) = site_api().await;
    fake.seed_stack("s1", FakeStack::default());

    let (status, _) = send(&app, Method::DELETE, "/sites/s1", None).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let stack = fake.stack("s1").unwrap();
    assert_eq!(
        stack.requests,
        vec![json!({"inheritSettings": true, "operation": "destroy"})]
    );

    let (status, _) = send(&app, Method::DELETE, "/sites/s1?rm", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(fake.stack("s1").is_none());

    let (status, _) = send(&app, Method::DELETE, "/sites/s1?rm=true", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_site() {
    let (_fake, app) = site_api().await;

    let (status, _) = send(&app, Method::DELETE, "/sites/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/sites/nope?rm", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
