//! Integration tests for `--dry-run`: the plan is printed, nothing runs.

#![allow(clippy::expect_used)]

use predicates::prelude::*;
use tempfile::TempDir;

use crate::cli_tests::deployctl;

/// Run in an empty directory with a config path that does not exist, so the
/// user's own config never leaks in.
fn isolated() -> (TempDir, assert_cmd::Command) {
    let dir = TempDir::new().expect("tempdir");
    let mut cmd = deployctl();
    cmd.current_dir(dir.path())
        .env("DEPLOYCTL_CONFIG", dir.path().join("config.yaml"));
    (dir, cmd)
}

#[test]
fn test_up_dry_run_lists_the_compose_sequence() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["--dry-run", "up", "--compose", "standalone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("docker-compose down"))
        .stdout(predicate::str::contains("docker-compose up --build -d"))
        .stdout(predicate::str::contains("Waiting 10s for services to start"))
        .stdout(predicate::str::contains("docker-compose ps"));
}

#[test]
fn test_up_dry_run_json_reports_skipped_steps() {
    let (_dir, mut cmd) = isolated();
    let assert = cmd
        .args(["--dry-run", "--json", "up", "--compose", "plugin", "--wait", "3"])
        .assert()
        .success();
    let v: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(v["plan"], "up");
    assert_eq!(v["dry_run"], true);
    let steps = v["steps"].as_array().expect("steps");
    assert_eq!(steps.len(), 4);
    assert_eq!(steps[0]["command"], "docker compose down");
    assert_eq!(steps[2]["label"], "Waiting 3s for services to start");
    assert!(steps.iter().all(|s| s["result"] == "skipped"));
    assert_eq!(v["endpoints"][0]["url"], "http://localhost:8000");
}

#[test]
fn test_remote_deploy_dry_run_shows_scp_then_ssh() {
    let (_dir, mut cmd) = isolated();
    cmd.args([
        "--dry-run",
        "remote",
        "deploy",
        "--host",
        "203.0.113.10",
        "--user",
        "ubuntu",
        "--key",
        "/keys/deploy.pem",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains(
        "scp -i /keys/deploy.pem -r . 'ubuntu@203.0.113.10:~/app'",
    ))
    .stdout(predicate::str::contains(
        "ssh -i /keys/deploy.pem ubuntu@203.0.113.10 'cd ~/app && docker-compose down && docker-compose pull && docker-compose up --build -d'",
    ));
}

#[test]
fn test_remote_deploy_reads_host_from_env() {
    let (_dir, mut cmd) = isolated();
    cmd.env("DEPLOYCTL_REMOTE_HOST", "deploy.example.com")
        .env("DEPLOYCTL_REMOTE_KEY", "/keys/k.pem")
        .args(["--dry-run", "remote", "deploy", "--port", "2222"])
        .assert()
        .success()
        .stdout(predicate::str::contains("scp -i /keys/k.pem -P 2222 -r ."))
        .stdout(predicate::str::contains("ssh -i /keys/k.pem -p 2222 deploy.example.com"));
}

#[test]
fn test_remote_deploy_without_host_fails() {
    let (_dir, mut cmd) = isolated();
    cmd.args(["--dry-run", "remote", "deploy"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No remote host configured"));
}

#[test]
fn test_remote_deploy_without_host_json_error() {
    let (_dir, mut cmd) = isolated();
    let assert = cmd
        .args(["--json", "--dry-run", "remote", "deploy"])
        .assert()
        .code(1);
    let v: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(v["error"], true);
    assert_eq!(v["code"], "REMOTE_NOT_CONFIGURED");
}

#[test]
fn test_remote_rejects_option_like_host() {
    let (_dir, mut cmd) = isolated();
    cmd.args([
        "--dry-run",
        "remote",
        "status",
        "--host=-oProxyCommand=sh",
        "--key",
        "/k",
    ])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Invalid remote host"));
}

#[test]
fn test_remote_rejects_option_like_user_from_env() {
    let (_dir, mut cmd) = isolated();
    let assert = cmd
        .env("DEPLOYCTL_REMOTE_USER", "-oProxyCommand=touch /tmp/owned")
        .args([
            "--json",
            "--dry-run",
            "remote",
            "deploy",
            "--host",
            "example.com",
            "--key",
            "/k",
        ])
        .assert()
        .code(1);
    let out = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    assert!(!out.contains("ProxyCommand=touch /tmp/owned@"), "{out}");
    let v: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    assert_eq!(v["code"], "INVALID_REMOTE");
    assert!(v["message"].as_str().expect("message").contains("Invalid remote user"));
}

#[test]
fn test_logs_dry_run_passes_flags_through() {
    let (_dir, mut cmd) = isolated();
    cmd.args([
        "--dry-run",
        "logs",
        "--compose",
        "standalone",
        "--tail",
        "50",
        "-s",
        "backend",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("docker-compose logs --tail 50 backend"));
}

#[test]
fn test_down_dry_run_uses_custom_project() {
    let (dir, mut cmd) = isolated();
    std::fs::write(
        dir.path().join("config.yaml"),
        "project:\n  dir: stack\n  compose_file: compose.prod.yml\n",
    )
    .expect("write config");
    cmd.args(["--dry-run", "down", "--compose", "plugin"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "docker compose -f stack/compose.prod.yml --project-directory stack down",
        ));
}
