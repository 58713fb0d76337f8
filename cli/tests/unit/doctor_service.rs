//! Unit tests for the doctor application service.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use deployctl_cli::application::services::doctor::run_doctor;
use deployctl_cli::domain::config::DeployConfig;
use deployctl_cli::domain::health::{KeyFileState, collect_issues};

use crate::helpers::{MockFs, NoopReporter, RecordingRunner, not_found, ok_output};

const HOME: &str = "/home/me";

fn all_tools() -> RecordingRunner {
    RecordingRunner::new(|argv| match argv[0].as_str() {
        "docker" if argv.len() == 2 => Ok(ok_output(b"Docker version 26.1.0, build 9714adc\n")),
        "docker" => Err(not_found()),
        "docker-compose" => Ok(ok_output(b"docker-compose version 1.29.2\n")),
        _ => Ok(ok_output(b"")),
    })
}

fn remote_config() -> DeployConfig {
    let mut config = DeployConfig::default();
    config.remote.host = Some("203.0.113.10".to_string());
    config.remote.key_file = Some(PathBuf::from("~/.ssh/deploy.pem"));
    config
}

#[tokio::test]
async fn healthy_local_setup_has_no_issues() {
    let fs = MockFs::default().with_file("./docker-compose.yml", 0o644);
    let checks = run_doctor(
        &all_tools(),
        &fs,
        &NoopReporter,
        &DeployConfig::default(),
        Some(Path::new(HOME)),
    )
    .await
    .expect("doctor");

    assert!(checks.tools.iter().all(|t| t.found));
    assert_eq!(
        checks.tools[0].version.as_deref(),
        Some("Docker version 26.1.0, build 9714adc")
    );
    assert_eq!(
        checks.compose.as_deref(),
        Some("docker-compose (docker-compose version 1.29.2)")
    );
    assert_eq!(checks.remote.key_file, KeyFileState::NotConfigured);
    assert!(collect_issues(&checks).is_empty());
}

#[tokio::test]
async fn missing_ssh_only_matters_with_remote_host() {
    let runner = RecordingRunner::new(|argv| match argv[0].as_str() {
        "ssh" | "scp" => Err(not_found()),
        _ => Ok(ok_output(b"ok\n")),
    });
    let fs = MockFs::default()
        .with_file("./docker-compose.yml", 0o644)
        .with_file("/home/me/.ssh/deploy.pem", 0o600);

    let local = run_doctor(&runner, &fs, &NoopReporter, &DeployConfig::default(), Some(Path::new(HOME)))
        .await
        .expect("doctor");
    assert!(collect_issues(&local).is_empty());

    let remote = run_doctor(&runner, &fs, &NoopReporter, &remote_config(), Some(Path::new(HOME)))
        .await
        .expect("doctor");
    let issues = collect_issues(&remote);
    assert_eq!(issues.len(), 2, "{issues:?}");
    assert!(issues.iter().any(|i| i.starts_with("ssh")));
}

#[tokio::test]
async fn open_key_file_is_flagged() {
    let fs = MockFs::default()
        .with_file("./docker-compose.yml", 0o644)
        .with_file("/home/me/.ssh/deploy.pem", 0o644);
    let checks = run_doctor(&all_tools(), &fs, &NoopReporter, &remote_config(), Some(Path::new(HOME)))
        .await
        .expect("doctor");

    assert!(matches!(
        checks.remote.key_file,
        KeyFileState::TooOpen { mode: 0o644, .. }
    ));
    let issues = collect_issues(&checks);
    assert!(issues.iter().any(|i| i.contains("chmod 600")), "{issues:?}");
}

#[tokio::test]
async fn missing_compose_file_and_cli_are_reported() {
    let runner = RecordingRunner::new(|argv| match argv[0].as_str() {
        "docker-compose" => Err(not_found()),
        "docker" if argv.get(1).map(String::as_str) == Some("compose") => Err(not_found()),
        _ => Ok(ok_output(b"ok\n")),
    });
    let checks = run_doctor(
        &runner,
        &MockFs::default(),
        &NoopReporter,
        &DeployConfig::default(),
        None,
    )
    .await
    .expect("doctor");

    assert!(checks.compose.is_none());
    assert!(!checks.project.compose_file_found);
    assert_eq!(collect_issues(&checks).len(), 2);
}
