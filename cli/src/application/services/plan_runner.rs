//! Application service: executes a [`Plan`] step by step.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! Steps run strictly in order; each child process is awaited before the
//! next step starts.

use anyhow::Result;
use chrono::Utc;
use deployctl_common::{DeployReport, StepOutcome, StepReport};

use crate::application::ports::{CommandRunner, ProgressReporter};
use crate::domain::error::DeployError;
use crate::domain::plan::{Invocation, Plan, Step};

/// How a plan is executed.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    /// Report the steps without running anything.
    pub dry_run: bool,
    /// Continue after a failed step instead of skipping the rest.
    pub keep_going: bool,
}

/// Run every step of `plan` and record the outcome of each.
///
/// A non-zero exit marks the step `Failed`; later steps are `Skipped` unless
/// `keep_going` is set. The returned report is `Ok` either way, use
/// [`ensure_succeeded`] to turn a failed step into an error.
///
/// # Errors
///
/// Returns an error if a program cannot be spawned at all.
pub async fn execute_plan(
    runner: &impl CommandRunner,
    reporter: &impl ProgressReporter,
    plan: &Plan,
    opts: RunOptions,
) -> Result<DeployReport> {
    let mut steps = Vec::with_capacity(plan.steps.len());
    let mut failed = false;

    for step in &plan.steps {
        let command = match step {
            Step::Run { invocation, .. } => Some(invocation.to_string()),
            Step::Wait { .. } => None,
        };

        if opts.dry_run || (failed && !opts.keep_going) {
            steps.push(StepReport {
                label: step.label().to_string(),
                command,
                outcome: StepOutcome::Skipped,
            });
            continue;
        }

        let outcome = match step {
            Step::Run { label, invocation } => {
                reporter.step(label);
                let status = run_status(runner, invocation).await?;
                if status.success() {
                    StepOutcome::Succeeded
                } else {
                    failed = true;
                    tracing::warn!(code = ?status.code(), command = %invocation, "step failed");
                    reporter.warn(&format!("{label} failed"));
                    StepOutcome::Failed {
                        code: status.code(),
                    }
                }
            }
            Step::Wait { label, duration } => {
                reporter.step(label);
                tokio::time::sleep(*duration).await;
                StepOutcome::Waited {
                    seconds: duration.as_secs(),
                }
            }
        };

        steps.push(StepReport {
            label: step.label().to_string(),
            command,
            outcome,
        });
    }

    Ok(DeployReport {
        plan: plan.name.clone(),
        dry_run: opts.dry_run,
        steps,
        endpoints: plan.endpoints.clone(),
        finished_at: Utc::now(),
    })
}

/// Turn the first failed step of `report` into `DeployError::StepFailed`.
///
/// # Errors
///
/// Returns `DeployError::StepFailed` if any step failed.
pub fn ensure_succeeded(report: &DeployReport) -> Result<()> {
    let failure = report.steps.iter().find_map(|s| match s.outcome {
        StepOutcome::Failed { code } => Some((s, code)),
        _ => None,
    });
    match failure {
        Some((step, code)) => Err(DeployError::StepFailed {
            step: step.label.clone(),
            command: step.command.clone().unwrap_or_default(),
            code,
        }
        .into()),
        None => Ok(()),
    }
}

/// Run a single invocation with inherited stdio, failing on non-zero exit.
///
/// # Errors
///
/// Returns `DeployError::ToolMissing` if the program is not installed and
/// `DeployError::StepFailed` if it exits non-zero.
pub async fn run_passthrough(
    runner: &impl CommandRunner,
    label: &str,
    invocation: &Invocation,
) -> Result<()> {
    let status = run_status(runner, invocation).await?;
    if status.success() {
        Ok(())
    } else {
        Err(DeployError::StepFailed {
            step: label.to_string(),
            command: invocation.to_string(),
            code: status.code(),
        }
        .into())
    }
}

async fn run_status(
    runner: &impl CommandRunner,
    invocation: &Invocation,
) -> Result<std::process::ExitStatus> {
    tracing::info!(command = %invocation, "running");
    runner
        .run_status(&invocation.program, &invocation.arg_refs())
        .await
        .map_err(|e| spawn_error(&invocation.program, e))
}

/// Map a spawn failure to `ToolMissing` when the OS says the program does not
/// exist.
pub(crate) fn spawn_error(program: &str, err: anyhow::Error) -> anyhow::Error {
    let not_found = err
        .chain()
        .filter_map(|c| c.downcast_ref::<std::io::Error>())
        .any(|io| io.kind() == std::io::ErrorKind::NotFound);
    if not_found {
        DeployError::ToolMissing {
            program: program.to_string(),
        }
        .into()
    } else {
        err
    }
}
