//! Application service: pick the compose CLI available on this host.

use anyhow::Result;

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::compose::{ComposeCommand, ComposeVariant};
use crate::domain::error::DeployError;

async fn probe(runner: &impl CommandRunner, program: &str, args: &[&str]) -> Option<String> {
    match runner.run(program, args).await {
        Ok(output) if output.status.success() => {
            let stdout = String::from_utf8_lossy(&output.stdout);
            Some(stdout.lines().next().unwrap_or_default().trim().to_string())
        }
        _ => None,
    }
}

/// Resolve `variant` to a concrete compose CLI.
///
/// `Auto` prefers the standalone `docker-compose` binary and falls back to the
/// `docker compose` plugin.
///
/// # Errors
///
/// Returns `DeployError::ComposeNotFound` if `Auto` finds neither.
pub async fn detect_compose(
    runner: &impl CommandRunner,
    variant: ComposeVariant,
) -> Result<ComposeCommand> {
    match variant {
        ComposeVariant::Standalone => Ok(ComposeCommand::Standalone),
        ComposeVariant::Plugin => Ok(ComposeCommand::Plugin),
        ComposeVariant::Auto => {
            if probe(runner, "docker-compose", &["version"]).await.is_some() {
                tracing::debug!("using standalone docker-compose");
                return Ok(ComposeCommand::Standalone);
            }
            if probe(runner, "docker", &["compose", "version"]).await.is_some() {
                tracing::debug!("using docker compose plugin");
                return Ok(ComposeCommand::Plugin);
            }
            Err(DeployError::ComposeNotFound.into())
        }
    }
}

/// Like [`detect_compose`], but a dry run never fails on a missing compose
/// CLI: it warns and assumes `docker-compose`.
///
/// # Errors
///
/// Returns `DeployError::ComposeNotFound` outside a dry run.
pub async fn resolve_compose(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    variant: ComposeVariant,
    dry_run: bool,
) -> Result<ComposeCommand> {
    match detect_compose(runner, variant).await {
        Err(_) if dry_run => {
            reporter.warn("No compose command found; showing docker-compose");
            Ok(ComposeCommand::Standalone)
        }
        other => other,
    }
}

/// First line of the compose version output, if the CLI runs.
pub async fn compose_version(runner: &impl CommandRunner, compose: ComposeCommand) -> Option<String> {
    match compose {
        ComposeCommand::Standalone => probe(runner, "docker-compose", &["version"]).await,
        ComposeCommand::Plugin => probe(runner, "docker", &["compose", "version"]).await,
    }
}
