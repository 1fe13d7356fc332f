//! Deployment command unit tests

use openapi_client::models::{
    CreateDeploymentResponse, Deployment, DeploymentJob, DeploymentLogLine, DeploymentLogs,
    DeploymentStep, Operation,
};
use serde_json::json;
use site_driver::app::commands::{
    format_accepted, format_deployment, format_logs, request_deployment, RequestOptions,
};
use site_driver::errors::{ApiError, DriverError};
use site_driver::models::scope::StackScope;

use crate::mocks::{bad_gateway, not_found, Call, MockApi, Op};

fn scope() -> StackScope {
    StackScope::new("acme", "sites", "dev")
}

fn options(create_stack: bool) -> RequestOptions {
    RequestOptions {
        operation: Operation::Update,
        repo_url: Some("https://github.com/acme/site-program.git".to_string()),
        branch: Some("refs/heads/main".to_string()),
        repo_dir: None,
        inherit_settings: false,
        create_stack,
    }
}

fn requested_body(call: &Call) -> serde_json::Value {
    match call {
        Call::CreateDeployment(_, request) => serde_json::to_value(request).unwrap(),
        other => panic!("expected a deployment request, got {:?}", other),
    }
}

#[tokio::test]
async fn test_request_sends_source_context() {
    let api = MockApi::new();

    let accepted = request_deployment(&api, &scope(), &options(false)).await.unwrap();
    assert_eq!(accepted.id, "dep-1");

    let calls = api.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        requested_body(&calls[0]),
        json!({
            "sourceContext": {
                "git": {
                    "repoURL": "https://github.com/acme/site-program.git",
                    "branch": "refs/heads/main"
                }
            },
            "inheritSettings": false,
            "operation": "update"
        })
    );
}

#[tokio::test]
async fn test_request_without_git_fields_omits_source() {
    let api = MockApi::new();
    let options = RequestOptions {
        operation: Operation::Destroy,
        repo_url: None,
        branch: None,
        repo_dir: None,
        inherit_settings: true,
        create_stack: false,
    };

    request_deployment(&api, &scope(), &options).await.unwrap();
    assert_eq!(
        requested_body(&api.calls()[0]),
        json!({"inheritSettings": true, "operation": "destroy"})
    );
}

#[tokio::test]
async fn test_request_creates_missing_stack_and_retries() {
    let api = MockApi::new().failing_once(Op::CreateDeployment, not_found);

    let accepted = request_deployment(&api, &scope(), &options(true)).await.unwrap();
    assert_eq!(accepted.id, "dep-2");

    let calls = api.calls();
    assert_eq!(calls.len(), 3);
    assert!(matches!(calls[0], Call::CreateDeployment(..)));
    assert_eq!(calls[1], Call::CreateStack("acme/sites/dev".to_string()));
    assert!(matches!(calls[2], Call::CreateDeployment(..)));
}

#[tokio::test]
async fn test_request_tolerates_concurrently_created_stack() {
    let api = MockApi::new()
        .failing_once(Op::CreateDeployment, not_found)
        .failing(Op::CreateStack, crate::mocks::already_exists);

    assert!(request_deployment(&api, &scope(), &options(true)).await.is_ok());
    assert_eq!(api.calls().len(), 3);
}

#[tokio::test]
async fn test_request_missing_stack_without_create() {
    let api = MockApi::new().failing_once(Op::CreateDeployment, not_found);

    let err = request_deployment(&api, &scope(), &options(false)).await.unwrap_err();
    assert!(matches!(err, DriverError::ApiError(ApiError::NotFound)));
    assert_eq!(api.calls().len(), 1);
}

#[tokio::test]
async fn test_request_stack_creation_failure() {
    let api = MockApi::new()
        .failing_once(Op::CreateDeployment, not_found)
        .failing(Op::CreateStack, bad_gateway);

    let err = request_deployment(&api, &scope(), &options(true)).await.unwrap_err();
    assert!(matches!(
        err,
        DriverError::ApiError(ApiError::UnexpectedResponse { .. })
    ));
    assert_eq!(api.calls().len(), 2);
}

#[test]
fn test_format_accepted() {
    let response = CreateDeploymentResponse {
        id: "dep-7".to_string(),
        console_url: Some("https://app.example.com/acme/sites/dev/deployments/dep-7".to_string()),
        version: 7,
    };
    assert_eq!(
        format_accepted(&response),
        "Deployment successfully created.\nDeployment ID: dep-7\n\
         Console link: https://app.example.com/acme/sites/dev/deployments/dep-7"
    );

    let bare = CreateDeploymentResponse {
        id: "dep-8".to_string(),
        ..Default::default()
    };
    assert_eq!(
        format_accepted(&bare),
        "Deployment successfully created.\nDeployment ID: dep-8"
    );
}

#[test]
fn test_format_deployment_numbers_steps() {
    colored::control::set_override(false);

    let deployment = Deployment {
        id: "dep-1".to_string(),
        status: "running".to_string(),
        version: 3,
        created: Some("2024-01-01T00:00:00Z".to_string()),
        modified: None,
        jobs: vec![DeploymentJob {
            status: "running".to_string(),
            steps: vec![
                DeploymentStep {
                    name: "Get source".to_string(),
                    status: "succeeded".to_string(),
                },
                DeploymentStep {
                    name: "Pulumi up".to_string(),
                    status: "running".to_string(),
                },
            ],
        }],
    };

    assert_eq!(
        format_deployment(&deployment),
        "Deployment dep-1 (version 3): running\n  \
         created:  2024-01-01T00:00:00Z\n  \
         step 1: Get source [succeeded]\n  \
         step 2: Pulumi up [running]"
    );
}

#[test]
fn test_format_logs() {
    colored::control::set_override(false);

    let logs = DeploymentLogs {
        lines: vec![
            DeploymentLogLine {
                header: Some("Pulumi up".to_string()),
                timestamp: "2024-01-01T00:00:01Z".to_string(),
                line: "Updating (dev)".to_string(),
            },
            DeploymentLogLine {
                header: None,
                timestamp: "2024-01-01T00:00:02Z".to_string(),
                line: "+ aws:s3:Bucket site created".to_string(),
            },
        ],
        next_offset: Some(2),
    };

    assert_eq!(
        format_logs(&logs),
        "Pulumi up\n\
         2024-01-01T00:00:01Z Updating (dev)\n\
         2024-01-01T00:00:02Z + aws:s3:Bucket site created\n\
         next offset: 2\n"
    );
}
