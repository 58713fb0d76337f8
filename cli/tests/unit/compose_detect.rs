//! Unit tests for compose CLI detection.

#![allow(clippy::expect_used)]

use deployctl_cli::application::services::compose_detect::{
    compose_version, detect_compose, resolve_compose,
};
use deployctl_cli::domain::compose::{ComposeCommand, ComposeVariant};
use deployctl_cli::domain::error::DeployError;

use crate::helpers::{
    CollectingReporter, NoopReporter, RecordingRunner, err_output, not_found, ok_output,
};

fn plugin_only() -> RecordingRunner {
    RecordingRunner::new(|argv| match argv[0].as_str() {
        "docker-compose" => Err(not_found()),
        _ => Ok(ok_output(b"Docker Compose version v2.27.0\n")),
    })
}

#[tokio::test]
async fn auto_prefers_standalone() {
    let runner = RecordingRunner::new(|_| Ok(ok_output(b"docker-compose version 1.29.2\n")));
    let cmd = detect_compose(&runner, ComposeVariant::Auto).await.expect("found");
    assert_eq!(cmd, ComposeCommand::Standalone);
    assert_eq!(runner.calls().len(), 1);
    assert_eq!(runner.calls()[0].argv, ["docker-compose", "version"]);
}

#[tokio::test]
async fn auto_falls_back_to_plugin() {
    let runner = plugin_only();
    let cmd = detect_compose(&runner, ComposeVariant::Auto).await.expect("found");
    assert_eq!(cmd, ComposeCommand::Plugin);
    assert_eq!(runner.calls()[1].argv, ["docker", "compose", "version"]);
}

#[tokio::test]
async fn auto_treats_non_zero_exit_as_absent() {
    let runner = RecordingRunner::new(|_| Ok(err_output(1, b"unknown command")));
    let err = detect_compose(&runner, ComposeVariant::Auto)
        .await
        .expect_err("nothing found");
    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::ComposeNotFound)
    ));
}

#[tokio::test]
async fn explicit_variant_does_not_probe() {
    let runner = RecordingRunner::succeeding();
    let cmd = detect_compose(&runner, ComposeVariant::Plugin).await.expect("plugin");
    assert_eq!(cmd, ComposeCommand::Plugin);
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn dry_run_falls_back_with_warning() {
    let runner = RecordingRunner::new(|_| Err(not_found()));
    let reporter = CollectingReporter::default();
    let cmd = resolve_compose(&runner, &reporter, ComposeVariant::Auto, true)
        .await
        .expect("dry run never fails");
    assert_eq!(cmd, ComposeCommand::Standalone);
    assert_eq!(reporter.warnings.lock().expect("lock").len(), 1);
}

#[tokio::test]
async fn real_run_fails_without_compose() {
    let runner = RecordingRunner::new(|_| Err(not_found()));
    assert!(
        resolve_compose(&runner, &NoopReporter, ComposeVariant::Auto, false)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn version_is_first_stdout_line() {
    let runner = plugin_only();
    let version = compose_version(&runner, ComposeCommand::Plugin).await;
    assert_eq!(version.as_deref(), Some("Docker Compose version v2.27.0"));
}
