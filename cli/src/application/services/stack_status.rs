//! Application service: container status of the compose stack.

use std::process::Output;

use anyhow::{Context, Result};
use deployctl_common::ServiceStatus;

use crate::application::ports::CommandRunner;
use crate::application::services::plan_runner::spawn_error;
use crate::domain::compose::ComposeCommand;
use crate::domain::config::ProjectConfig;
use crate::domain::plan::{self, Invocation};
use crate::domain::remote::RemoteTarget;
use crate::domain::status::parse_ps_json;

async fn capture(runner: &impl CommandRunner, invocation: &Invocation) -> Result<Output> {
    tracing::info!(command = %invocation, "capturing");
    let output = runner
        .run(&invocation.program, &invocation.arg_refs())
        .await
        .map_err(|e| spawn_error(&invocation.program, e))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        anyhow::bail!("{invocation} failed: {}", stderr.trim());
    }
    Ok(output)
}

/// Containers of the local stack.
///
/// # Errors
///
/// Returns an error if compose fails or its output cannot be parsed.
pub async fn local_services(
    runner: &impl CommandRunner,
    project: &ProjectConfig,
    compose: ComposeCommand,
) -> Result<Vec<ServiceStatus>> {
    let inv = plan::local_ps(project, compose, true);
    let output = capture(runner, &inv).await?;
    parse_ps_json(&String::from_utf8_lossy(&output.stdout)).context("reading local status")
}

/// Containers of the stack on the remote host, queried over ssh.
///
/// # Errors
///
/// Returns an error if ssh or compose fails or the output cannot be parsed.
pub async fn remote_services(
    runner: &impl CommandRunner,
    remote: &RemoteTarget,
    project: &ProjectConfig,
    compose: ComposeCommand,
) -> Result<Vec<ServiceStatus>> {
    let inv = plan::remote_compose(remote, project, compose, &["ps", "--format", "json"]);
    let output = capture(runner, &inv).await?;
    parse_ps_json(&String::from_utf8_lossy(&output.stdout))
        .with_context(|| format!("reading status from {}", remote.destination()))
}
