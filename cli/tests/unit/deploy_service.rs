//! Unit tests for the local and remote deploy use-cases.
//!
//! The argv each use-case hands to the runner is checked literally.

#![allow(clippy::expect_used)]

use std::path::PathBuf;
use std::time::Duration;

use deployctl_cli::application::services::deploy::{
    deploy_local, deploy_remote, stop_local, stop_remote,
};
use deployctl_cli::application::services::plan_runner::RunOptions;
use deployctl_cli::domain::compose::ComposeCommand;
use deployctl_cli::domain::config::{DeployConfig, ProjectConfig};
use deployctl_cli::domain::error::DeployError;
use deployctl_cli::domain::remote::RemoteTarget;

use crate::helpers::{MockFs, NoopReporter, RecordingRunner};

const KEY: &str = "/home/me/.ssh/deploy.pem";

fn target() -> RemoteTarget {
    RemoteTarget {
        host: "203.0.113.10".to_string(),
        user: Some("ubuntu".to_string()),
        port: 22,
        key_file: PathBuf::from(KEY),
        path: "~/app".to_string(),
    }
}

fn fs_with_key() -> MockFs {
    MockFs::default().with_file(KEY, 0o600)
}

#[tokio::test(start_paused = true)]
async fn local_deploy_with_plugin_prefixes_compose() {
    let runner = RecordingRunner::succeeding();
    let report = deploy_local(
        &runner,
        &NoopReporter,
        &DeployConfig::default(),
        ComposeCommand::Plugin,
        Duration::from_secs(3),
        RunOptions::default(),
    )
    .await
    .expect("deploy");

    assert_eq!(
        runner.passthrough_lines(),
        [
            "docker compose down",
            "docker compose up --build -d",
            "docker compose ps",
        ]
    );
    let urls: Vec<&str> = report.endpoints.iter().map(|e| e.url.as_str()).collect();
    assert_eq!(urls, ["http://localhost:8000", "http://localhost:3000"]);
}

#[tokio::test]
async fn local_stop_is_single_down() {
    let runner = RecordingRunner::succeeding();
    stop_local(
        &runner,
        &NoopReporter,
        &ProjectConfig::default(),
        ComposeCommand::Standalone,
        RunOptions::default(),
    )
    .await
    .expect("down");
    assert_eq!(runner.passthrough_lines(), ["docker-compose down"]);
}

#[tokio::test]
async fn remote_deploy_copies_then_redeploys() {
    let runner = RecordingRunner::succeeding();
    let report = deploy_remote(
        &runner,
        &NoopReporter,
        &fs_with_key(),
        &target(),
        &ProjectConfig::default(),
        ComposeCommand::Standalone,
        RunOptions::default(),
    )
    .await
    .expect("deploy");

    let calls = runner.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[0].argv,
        ["scp", "-i", KEY, "-r", ".", "ubuntu@203.0.113.10:~/app"]
    );
    assert_eq!(
        calls[1].argv,
        [
            "ssh",
            "-i",
            KEY,
            "ubuntu@203.0.113.10",
            "cd ~/app && docker-compose down && docker-compose pull && docker-compose up --build -d",
        ]
    );
    assert!(report.succeeded());
}

#[tokio::test]
async fn remote_deploy_stops_when_copy_fails() {
    let runner = RecordingRunner::failing_on("scp", 1);
    let report = deploy_remote(
        &runner,
        &NoopReporter,
        &fs_with_key(),
        &target(),
        &ProjectConfig::default(),
        ComposeCommand::Standalone,
        RunOptions::default(),
    )
    .await
    .expect("report");

    assert_eq!(runner.calls().len(), 1, "ssh must not run after a failed copy");
    assert!(!report.succeeded());
}

#[tokio::test]
async fn remote_deploy_requires_existing_key() {
    let runner = RecordingRunner::succeeding();
    let err = deploy_remote(
        &runner,
        &NoopReporter,
        &MockFs::default(),
        &target(),
        &ProjectConfig::default(),
        ComposeCommand::Standalone,
        RunOptions::default(),
    )
    .await
    .expect_err("missing key");

    assert!(matches!(
        err.downcast_ref::<DeployError>(),
        Some(DeployError::KeyFileMissing(_))
    ));
    assert!(runner.calls().is_empty());
}

#[tokio::test]
async fn remote_dry_run_skips_key_check() {
    let runner = RecordingRunner::succeeding();
    let opts = RunOptions {
        dry_run: true,
        keep_going: false,
    };
    let report = deploy_remote(
        &runner,
        &NoopReporter,
        &MockFs::default(),
        &target(),
        &ProjectConfig::default(),
        ComposeCommand::Standalone,
        opts,
    )
    .await
    .expect("dry run");
    assert!(runner.calls().is_empty());
    assert_eq!(report.steps.len(), 2);
}

#[tokio::test]
async fn remote_stop_runs_down_over_ssh() {
    let runner = RecordingRunner::succeeding();
    let mut remote = target();
    remote.port = 2222;
    stop_remote(
        &runner,
        &NoopReporter,
        &fs_with_key(),
        &remote,
        &ProjectConfig::default(),
        ComposeCommand::Plugin,
        RunOptions::default(),
    )
    .await
    .expect("down");
    assert_eq!(
        runner.passthrough_lines(),
        [format!("ssh -i {KEY} -p 2222 ubuntu@203.0.113.10 cd ~/app && docker compose down")]
    );
}
