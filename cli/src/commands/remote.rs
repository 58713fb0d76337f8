//! `deployctl remote`: deploy to and inspect a remote host over scp/ssh.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use clap::{Args, Subcommand};
use deployctl_common::StatusOutput;

use crate::app::AppContext;
use crate::application::services::plan_runner::ensure_succeeded;
use crate::application::services::{deploy, stack_status};
use crate::commands::logs::LogsArgs;
use crate::commands::{ComposeArgs, passthrough};
use crate::domain::compose::ComposeCommand;
use crate::domain::config::{DeployConfig, RemoteConfig};
use crate::domain::error::DeployError;
use crate::domain::plan;
use crate::domain::remote::RemoteTarget;

/// Remote subcommands.
#[derive(Subcommand)]
pub enum RemoteCommand {
    /// Copy the project to the remote host, then pull, rebuild and start it there
    Deploy(RemoteDeployArgs),
    /// Stop the stack on the remote host
    Down(RemoteArgs),
    /// Show container status on the remote host
    Status(RemoteArgs),
    /// Show compose logs from the remote host
    Logs(RemoteLogsArgs),
}

/// Per-invocation overrides of the `remote.*` settings.
#[derive(Args, Debug, Default, Clone)]
pub struct RemoteTargetArgs {
    /// Remote host, optionally as user@host
    #[arg(long)]
    pub host: Option<String>,

    /// Remote user
    #[arg(long)]
    pub user: Option<String>,

    /// SSH private key file
    #[arg(long, value_name = "PATH")]
    pub key: Option<PathBuf>,

    /// SSH port
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: Option<u16>,

    /// Project directory on the remote host
    #[arg(long, value_name = "PATH")]
    pub path: Option<String>,
}

impl RemoteTargetArgs {
    /// Overlay the flags that were given onto `remote`.
    pub fn apply(&self, remote: &mut RemoteConfig) {
        if let Some(host) = &self.host {
            remote.host = Some(host.clone());
        }
        if let Some(user) = &self.user {
            remote.user = Some(user.clone());
        }
        if let Some(key) = &self.key {
            remote.key_file = Some(key.clone());
        }
        if let Some(port) = self.port {
            remote.port = port;
        }
        if let Some(path) = &self.path {
            remote.path = path.clone();
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct RemoteArgs {
    #[command(flatten)]
    pub target: RemoteTargetArgs,

    #[command(flatten)]
    pub compose: ComposeArgs,
}

#[derive(Args, Debug, Default)]
pub struct RemoteDeployArgs {
    #[command(flatten)]
    pub remote: RemoteArgs,

    /// Run the remote step even if the copy fails
    #[arg(long)]
    pub keep_going: bool,
}

#[derive(Args, Debug, Default)]
pub struct RemoteLogsArgs {
    #[command(flatten)]
    pub remote: RemoteArgs,

    #[command(flatten)]
    pub logs: LogsArgs,
}

/// Run a remote subcommand.
///
/// # Errors
///
/// Returns an error if the remote target is not fully configured, the user
/// declines the deploy prompt, or a step fails.
pub async fn run(app: &AppContext, cmd: RemoteCommand) -> Result<ExitCode> {
    match cmd {
        RemoteCommand::Deploy(args) => deploy_to(app, &args).await,
        RemoteCommand::Down(args) => down(app, &args).await,
        RemoteCommand::Status(args) => status(app, &args).await,
        RemoteCommand::Logs(args) => logs(app, &args).await,
    }
}

/// Config with overrides applied, the validated target, and the compose CLI
/// to use on the remote side.
fn resolve(app: &AppContext, args: &RemoteArgs) -> Result<(DeployConfig, RemoteTarget, ComposeCommand)> {
    let mut config = app.config()?;
    args.target.apply(&mut config.remote);
    let target = RemoteTarget::from_config(&config.remote, app.home.as_deref())?;
    // The remote host cannot be probed from here.
    let compose = args.compose.variant(&config).resolve_default();
    tracing::debug!(target = %target.destination(), compose = compose.shell_words(), "remote target");
    Ok((config, target, compose))
}

async fn deploy_to(app: &AppContext, args: &RemoteDeployArgs) -> Result<ExitCode> {
    let (config, target, compose) = resolve(app, &args.remote)?;

    if !app.dry_run {
        let prompt = format!(
            "Deploy {} to {}:{}?",
            config.project.dir.display(),
            target.destination(),
            target.path
        );
        if !app.confirm(&prompt, true)? {
            return Err(DeployError::Cancelled(target.destination()).into());
        }
    }

    let report = deploy::deploy_remote(
        &app.runner,
        &app.reporter(),
        &app.fs,
        &target,
        &config.project,
        compose,
        app.run_options(args.keep_going),
    )
    .await?;
    app.renderer().render_report(&report)?;
    ensure_succeeded(&report)?;
    Ok(ExitCode::SUCCESS)
}

async fn down(app: &AppContext, args: &RemoteArgs) -> Result<ExitCode> {
    let (config, target, compose) = resolve(app, args)?;
    let report = deploy::stop_remote(
        &app.runner,
        &app.reporter(),
        &app.fs,
        &target,
        &config.project,
        compose,
        app.run_options(false),
    )
    .await?;
    app.renderer().render_report(&report)?;
    ensure_succeeded(&report)?;
    Ok(ExitCode::SUCCESS)
}

async fn status(app: &AppContext, args: &RemoteArgs) -> Result<ExitCode> {
    let (config, target, compose) = resolve(app, args)?;

    if app.is_json() && !app.dry_run {
        let services =
            stack_status::remote_services(&app.runner, &target, &config.project, compose).await?;
        app.renderer().render_status(&StatusOutput {
            target: target.destination(),
            services,
            checked_at: Utc::now(),
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    let inv = plan::remote_compose(&target, &config.project, compose, &["ps"]);
    let label = format!("Container status on {}", target.destination());
    passthrough(app, "remote status", &label, inv).await?;
    Ok(ExitCode::SUCCESS)
}

async fn logs(app: &AppContext, args: &RemoteLogsArgs) -> Result<ExitCode> {
    let (config, target, compose) = resolve(app, &args.remote)?;
    let words = args.logs.compose_args();
    let refs: Vec<&str> = words.iter().map(String::as_str).collect();
    let inv = plan::remote_compose(&target, &config.project, compose, &refs);
    let label = format!("Container logs on {}", target.destination());
    passthrough(app, "remote logs", &label, inv).await?;
    Ok(ExitCode::SUCCESS)
}
