//! Application service: doctor use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

use std::path::Path;

use anyhow::Result;

use crate::application::ports::{CommandRunner, LocalFs, ProgressReporter};
use crate::application::services::compose_detect::{compose_version, detect_compose};
use crate::domain::config::DeployConfig;
use crate::domain::health::{
    DoctorChecks, KeyFileState, ProjectChecks, RemoteChecks, ToolCheck, classify_key_file,
};
use crate::domain::remote::expand_home;

/// Run the doctor probe workflow.
///
/// Accepts port trait bounds so the caller can inject real or mock
/// implementations. Rendering is the caller's responsibility.
///
/// # Errors
///
/// Returns an error if the key file permissions cannot be read.
pub async fn run_doctor(
    runner: &impl CommandRunner,
    fs: &impl LocalFs,
    reporter: &impl ProgressReporter,
    config: &DeployConfig,
    home: Option<&Path>,
) -> Result<DoctorChecks> {
    reporter.step("checking tools...");
    let tools = vec![
        probe_tool(runner, "docker", &["--version"], false).await,
        // OpenSSH prints its version to stderr.
        probe_tool(runner, "ssh", &["-V"], true).await,
        // scp has no version flag; running it bare exits 1 with usage.
        probe_presence(runner, "scp", true).await,
    ];

    reporter.step("checking compose...");
    let compose = match detect_compose(runner, config.project.compose_command).await {
        Ok(cmd) => {
            let version = compose_version(runner, cmd).await;
            Some(match version {
                Some(v) if !v.is_empty() => format!("{} ({v})", cmd.shell_words()),
                _ => cmd.shell_words().to_string(),
            })
        }
        Err(_) => None,
    };

    reporter.step("checking project...");
    let compose_path = config.project.compose_path();
    let project = ProjectChecks {
        compose_file: compose_path.display().to_string(),
        compose_file_found: fs.exists(&compose_path),
    };

    reporter.step("checking remote settings...");
    let key_file = match &config.remote.key_file {
        None => KeyFileState::NotConfigured,
        Some(key) => {
            let path = expand_home(key, home);
            let exists = fs.exists(&path);
            let mode = if exists { fs.mode(&path)? } else { None };
            classify_key_file(&path.display().to_string(), exists, mode)
        }
    };
    let remote = RemoteChecks {
        host: config.remote.host.clone(),
        key_file,
    };

    reporter.success("diagnostics complete");

    Ok(DoctorChecks {
        tools,
        compose,
        project,
        remote,
    })
}

async fn probe_tool(
    runner: &impl CommandRunner,
    name: &str,
    args: &[&str],
    remote_only: bool,
) -> ToolCheck {
    let Ok(output) = runner.run(name, args).await else {
        return ToolCheck {
            name: name.to_string(),
            found: false,
            version: None,
            remote_only,
        };
    };
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let version = stdout
        .lines()
        .chain(stderr.lines())
        .map(str::trim)
        .find(|l| !l.is_empty())
        .map(str::to_owned);
    ToolCheck {
        name: name.to_string(),
        found: true,
        version,
        remote_only,
    }
}

async fn probe_presence(runner: &impl CommandRunner, name: &str, remote_only: bool) -> ToolCheck {
    ToolCheck {
        name: name.to_string(),
        found: runner.run(name, &[]).await.is_ok(),
        version: None,
        remote_only,
    }
}
