//! Unit tests for the plan runner: ordering, fail-fast, keep-going, dry-run.

#![allow(clippy::expect_used)]

use std::time::Duration;

use deployctl_cli::application::services::plan_runner::{
    RunOptions, ensure_succeeded, execute_plan, run_passthrough,
};
use deployctl_cli::domain::compose::ComposeCommand;
use deployctl_cli::domain::config::DeployConfig;
use deployctl_cli::domain::error::DeployError;
use deployctl_cli::domain::plan::{self, Invocation};
use deployctl_common::StepOutcome;

use crate::helpers::{NoopReporter, RecordingRunner, not_found};

fn up_plan() -> plan::Plan {
    plan::local_up(
        &DeployConfig::default(),
        ComposeCommand::Standalone,
        Duration::from_secs(10),
    )
}

#[tokio::test(start_paused = true)]
async fn runs_every_step_in_order() {
    let runner = RecordingRunner::succeeding();
    let report = execute_plan(&runner, &NoopReporter, &up_plan(), RunOptions::default())
        .await
        .expect("plan runs");

    assert_eq!(
        runner.passthrough_lines(),
        [
            "docker-compose down",
            "docker-compose up --build -d",
            "docker-compose ps",
        ]
    );
    assert!(report.succeeded());
    assert_eq!(report.steps[2].outcome, StepOutcome::Waited { seconds: 10 });
    assert!(ensure_succeeded(&report).is_ok());
}

#[tokio::test(start_paused = true)]
async fn failed_step_skips_the_rest() {
    let runner = RecordingRunner::failing_on("up --build", 1);
    let report = execute_plan(&runner, &NoopReporter, &up_plan(), RunOptions::default())
        .await
        .expect("plan runs");

    assert_eq!(
        runner.passthrough_lines(),
        ["docker-compose down", "docker-compose up --build -d"]
    );
    assert_eq!(report.steps[1].outcome, StepOutcome::Failed { code: Some(1) });
    assert_eq!(report.steps[2].outcome, StepOutcome::Skipped);
    assert_eq!(report.steps[3].outcome, StepOutcome::Skipped);

    let err = ensure_succeeded(&report).expect_err("should fail");
    match err.downcast_ref::<DeployError>() {
        Some(DeployError::StepFailed { command, code, .. }) => {
            assert_eq!(command, "docker-compose up --build -d");
            assert_eq!(*code, Some(1));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn keep_going_runs_everything_but_still_fails() {
    let runner = RecordingRunner::failing_on("down", 2);
    let opts = RunOptions {
        dry_run: false,
        keep_going: true,
    };
    let report = execute_plan(&runner, &NoopReporter, &up_plan(), opts)
        .await
        .expect("plan runs");

    assert_eq!(runner.passthrough_lines().len(), 3);
    assert!(!report.succeeded());
    assert!(ensure_succeeded(&report).is_err());
}

#[tokio::test]
async fn dry_run_executes_nothing() {
    let runner = RecordingRunner::succeeding();
    let opts = RunOptions {
        dry_run: true,
        keep_going: false,
    };
    let report = execute_plan(&runner, &NoopReporter, &up_plan(), opts)
        .await
        .expect("plan runs");

    assert!(runner.calls().is_empty());
    assert!(report.dry_run);
    assert!(report.steps.iter().all(|s| s.outcome == StepOutcome::Skipped));
    assert_eq!(
        report.steps[1].command.as_deref(),
        Some("docker-compose up --build -d")
    );
    assert!(report.steps[2].command.is_none(), "wait steps have no command");
}

#[tokio::test(start_paused = true)]
async fn wait_step_sleeps_for_configured_duration() {
    let runner = RecordingRunner::succeeding();
    let started = tokio::time::Instant::now();
    execute_plan(&runner, &NoopReporter, &up_plan(), RunOptions::default())
        .await
        .expect("plan runs");
    assert!(started.elapsed() >= Duration::from_secs(10));
}

#[tokio::test]
async fn missing_program_is_tool_missing() {
    let runner = RecordingRunner::new(|_| Err(not_found()));
    let err = execute_plan(&runner, &NoopReporter, &up_plan(), RunOptions::default())
        .await
        .expect_err("spawn fails");
    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::ToolMissing { program }) if program == "docker-compose"
    ));
}

#[tokio::test]
async fn passthrough_fails_on_non_zero_exit() {
    let runner = RecordingRunner::failing_on("logs", 1);
    let inv = Invocation::new("docker-compose", ["logs"]);
    let err = run_passthrough(&runner, "Container logs", &inv)
        .await
        .expect_err("non-zero exit");
    assert!(err.to_string().contains("Container logs"), "{err}");
}
