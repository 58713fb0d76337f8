//! Application service: local and remote deploy use-cases.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::time::Duration;

use anyhow::Result;
use deployctl_common::DeployReport;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::application::services::plan_runner::{RunOptions, execute_plan};
use crate::domain::compose::ComposeCommand;
use crate::domain::config::{DeployConfig, ProjectConfig};
use crate::domain::error::DeployError;
use crate::domain::plan;
use crate::domain::remote::RemoteTarget;

/// Stop, rebuild and start the local stack, wait, then list containers.
///
/// # Errors
///
/// Returns an error if a program cannot be spawned.
pub async fn deploy_local(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    config: &DeployConfig,
    compose: ComposeCommand,
    wait: Duration,
    opts: RunOptions,
) -> Result<DeployReport> {
    let plan = plan::local_up(config, compose, wait);
    execute_plan(runner, reporter, &plan, opts).await
}

/// Stop the local stack.
///
/// # Errors
///
/// Returns an error if a program cannot be spawned.
pub async fn stop_local(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    project: &ProjectConfig,
    compose: ComposeCommand,
    opts: RunOptions,
) -> Result<DeployReport> {
    let plan = plan::local_down(project, compose);
    execute_plan(runner, reporter, &plan, opts).await
}

fn ensure_key_file(fs: &impl LocalFs, remote: &RemoteTarget, opts: RunOptions) -> Result<()> {
    if !opts.dry_run && !fs.exists(&remote.key_file) {
        return Err(DeployError::KeyFileMissing(remote.key_file.display().to_string()).into());
    }
    Ok(())
}

/// Copy the project to the remote host and redeploy the stack there.
///
/// # Errors
///
/// Returns `DeployError::KeyFileMissing` before running anything if the key
/// file does not exist, or an error if a program cannot be spawned.
pub async fn deploy_remote(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    fs: &impl LocalFs,
    remote: &RemoteTarget,
    project: &ProjectConfig,
    compose: ComposeCommand,
    opts: RunOptions,
) -> Result<DeployReport> {
    ensure_key_file(fs, remote, opts)?;
    let plan = plan::remote_deploy(remote, project, compose);
    execute_plan(runner, reporter, &plan, opts).await
}

/// Stop the stack on the remote host.
///
/// # Errors
///
/// Same as [`deploy_remote`].
pub async fn stop_remote(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    fs: &impl LocalFs,
    remote: &RemoteTarget,
    project: &ProjectConfig,
    compose: ComposeCommand,
    opts: RunOptions,
) -> Result<DeployReport> {
    ensure_key_file(fs, remote, opts)?;
    let plan = plan::remote_down(remote, project, compose);
    execute_plan(runner, reporter, &plan, opts).await
}
