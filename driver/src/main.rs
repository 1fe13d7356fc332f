//! Site Driver - Entry Point
//!
//! Serves the static site CRUD API, and drives one-off deployments and log
//! retrieval against Pulumi Deployments.

use std::time::Duration;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use secrecy::SecretString;
use tracing::{error, info};

use openapi_client::models::Operation;
use site_driver::app::commands::{
    format_accepted, format_deployment, format_logs, request_deployment, RequestOptions,
};
use site_driver::app::options::{
    ApiOptions, AppOptions, ProgramOptions, ServerOptions, PULUMI_API_URL,
};
use site_driver::app::run::{resolve_organization, run};
use site_driver::http::client::HttpClient;
use site_driver::logs::{init_logging, LogLevel, LogOptions};
use site_driver::models::scope::StackScope;
use site_driver::utils::version_info;

#[derive(Parser)]
#[command(name = "site-driver")]
#[command(about = "Static site CRUD service and deployment driver for Pulumi Deployments")]
#[command(version)]
struct Cli {
    /// Pulumi access token
    #[arg(long, env = "PULUMI_ACCESS_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Pulumi organization; defaults to the current user's first organization
    #[arg(long, env = "PULUMI_ORG", global = true)]
    org: Option<String>,

    /// Pulumi project holding the stacks
    #[arg(long, env = "PULUMI_PROJECT", global = true)]
    project: Option<String>,

    /// Pulumi Cloud API base URL
    #[arg(long, env = "PULUMI_API_URL", default_value = PULUMI_API_URL, global = true)]
    api_url: String,

    /// Timeout of a single API request, in seconds
    #[arg(long, default_value_t = 30, global = true)]
    timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "SITE_DRIVER_LOG", default_value = "info", global = true)]
    log_level: LogLevel,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the site CRUD API
    Serve(ServeArgs),

    /// Request a deployment
    Request(RequestArgs),

    /// Show a deployment and its steps
    Logs {
        #[command(flatten)]
        stack: StackArgs,

        /// The deployment id
        #[arg(long)]
        id: String,
    },

    /// Show the logs of a deployment step
    Step {
        #[command(flatten)]
        stack: StackArgs,

        /// The deployment id
        #[arg(long)]
        id: String,

        /// The step number to retrieve logs for
        #[arg(long, default_value_t = 1)]
        step: u32,

        /// The log offset to start from
        #[arg(long, default_value_t = 0)]
        offset: u64,
    },

    /// Print version information as JSON
    Version,
}

#[derive(Args)]
struct ServeArgs {
    /// The GitHub repository that contains the site's Pulumi program
    #[arg(long)]
    repo: String,

    /// The git branch that contains the site's Pulumi program
    #[arg(long, default_value = "main")]
    branch: String,

    /// The subdirectory of the git repository that contains the site's Pulumi program
    #[arg(long, default_value = "")]
    dir: String,

    /// The AWS region to deploy to
    #[arg(long, default_value = "us-west-2")]
    region: String,

    /// The AWS IAM Role ARN to use for OIDC integration
    #[arg(long)]
    role_arn: String,

    /// The session name to use for AWS OIDC integration
    #[arg(long, default_value = "site-deploy")]
    session_name: String,

    /// Host to listen on
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[derive(Args)]
struct StackArgs {
    /// Stack to act on
    #[arg(long, default_value = "dev")]
    stack: String,
}

#[derive(Args)]
struct RequestArgs {
    #[command(flatten)]
    stack: StackArgs,

    /// Operation to request (preview, update, refresh, destroy)
    #[arg(long, default_value = "update")]
    operation: Operation,

    /// Repo URL to use for the deployment
    #[arg(long, env = "PULUMI_DEPLOY_REPO")]
    repo_url: Option<String>,

    /// The git branch to deploy, e.g. refs/heads/main
    #[arg(long)]
    branch: Option<String>,

    /// Directory in the git repo to deploy
    #[arg(long)]
    repo_dir: Option<String>,

    /// Merge with the stack's saved deployment settings
    #[arg(long)]
    inherit: bool,

    /// Create the stack if it does not exist
    #[arg(long)]
    create_stack: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Version = cli.command {
        println!("{}", serde_json::to_string_pretty(&version_info())?);
        return Ok(());
    }

    let log_options = LogOptions {
        log_level: cli.log_level,
        json_format: cli.json_logs,
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let token = cli
        .token
        .clone()
        .ok_or_else(|| anyhow!("the --token flag or PULUMI_ACCESS_TOKEN is required"))?;
    let api = ApiOptions {
        base_url: cli.api_url.clone(),
        token: SecretString::from(token),
        timeout: Duration::from_secs(cli.timeout_secs),
    };
    let project = cli
        .project
        .clone()
        .ok_or_else(|| anyhow!("the --project flag or PULUMI_PROJECT is required"))?;

    match cli.command {
        Commands::Serve(args) => {
            let options = AppOptions {
                api,
                organization: cli.org,
                project,
                program: ProgramOptions {
                    repository: args.repo,
                    branch: args.branch,
                    dir: args.dir,
                    region: args.region,
                    role_arn: args.role_arn,
                    session_name: args.session_name,
                },
                server: ServerOptions {
                    host: args.host,
                    port: args.port,
                },
            };

            info!("Running site driver with options: {:?}", options);
            if let Err(e) = run(options, await_shutdown_signal()).await {
                error!("Failed to run the site driver: {e}");
                return Err(e.into());
            }
        }
        Commands::Request(args) => {
            let client = api.client()?;
            let scope = stack_scope(&client, cli.org.as_deref(), &project, args.stack.stack).await?;
            let options = RequestOptions {
                operation: args.operation,
                repo_url: args.repo_url,
                branch: args.branch,
                repo_dir: args.repo_dir,
                inherit_settings: args.inherit,
                create_stack: args.create_stack,
            };

            let accepted = request_deployment(&client, &scope, &options)
                .await
                .context("creating deployment")?;
            println!("{}", format_accepted(&accepted));
        }
        Commands::Logs { stack, id } => {
            let client = api.client()?;
            let scope = stack_scope(&client, cli.org.as_deref(), &project, stack.stack).await?;

            let deployment = client
                .get_deployment(&scope, &id)
                .await
                .with_context(|| format!("getting deployment '{}'", id))?;
            println!("{}", format_deployment(&deployment));
        }
        Commands::Step {
            stack,
            id,
            step,
            offset,
        } => {
            let client = api.client()?;
            let scope = stack_scope(&client, cli.org.as_deref(), &project, stack.stack).await?;

            let logs = client
                .get_deployment_logs(&scope, &id, step, offset)
                .await
                .with_context(|| format!("getting logs of deployment '{}' step {}", id, step))?;
            print!("{}", format_logs(&logs));
        }
        Commands::Version => {}
    }

    Ok(())
}

async fn stack_scope(
    client: &HttpClient,
    org: Option<&str>,
    project: &str,
    stack: String,
) -> anyhow::Result<StackScope> {
    let org = resolve_organization(client, org).await?;
    Ok(StackScope::new(org, project, stack))
}

async fn await_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (mut sigterm, mut sigint) =
            match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                (Ok(term), Ok(int)) => (term, int),
                _ => {
                    error!("Failed to install signal handlers, falling back to Ctrl+C");
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };

        tokio::select! {
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down...");
            }
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {e}");
        }
        info!("Ctrl+C received, shutting down...");
    }
}
