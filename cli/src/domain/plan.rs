//! Deployment plans: ordered external commands built purely from config.
//!
//! A plan is data. Nothing here spawns a process; `application::services::
//! plan_runner` executes the steps in order.

use std::fmt;
use std::time::Duration;

use deployctl_common::Endpoint;

use crate::domain::compose::ComposeCommand;
use crate::domain::config::{DeployConfig, ProjectConfig};
use crate::domain::remote::RemoteTarget;
use crate::domain::shell;

/// One external program with its argument vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    #[must_use]
    pub fn new(program: impl Into<String>, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Arguments as `&str`, the shape `CommandRunner` takes.
    #[must_use]
    pub fn arg_refs(&self) -> Vec<&str> {
        self.args.iter().map(String::as_str).collect()
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let words = std::iter::once(self.program.as_str()).chain(self.args.iter().map(String::as_str));
        f.write_str(&shell::join(words))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Run { label: String, invocation: Invocation },
    Wait { label: String, duration: Duration },
}

impl Step {
    fn run(label: &str, invocation: Invocation) -> Self {
        Self::Run {
            label: label.to_string(),
            invocation,
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Run { label, .. } | Self::Wait { label, .. } => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub name: String,
    pub steps: Vec<Step>,
    /// Announced after the plan succeeds.
    pub endpoints: Vec<Endpoint>,
}

impl Plan {
    /// A plan with one run step, used to show pass-through commands in dry runs.
    #[must_use]
    pub fn single(name: &str, label: &str, invocation: Invocation) -> Self {
        Self {
            name: name.to_string(),
            steps: vec![Step::run(label, invocation)],
            endpoints: Vec::new(),
        }
    }
}

// ── Local plans ───────────────────────────────────────────────────────────────

/// Stop, rebuild and start, pause, then list containers.
#[must_use]
pub fn local_up(config: &DeployConfig, compose: ComposeCommand, wait: Duration) -> Plan {
    let project = &config.project;
    Plan {
        name: "up".to_string(),
        steps: vec![
            Step::run("Stopping containers", compose.invocation(project, &["down"])),
            Step::run(
                "Building and starting containers",
                compose.invocation(project, &["up", "--build", "-d"]),
            ),
            Step::Wait {
                label: format!("Waiting {}s for services to start", wait.as_secs()),
                duration: wait,
            },
            Step::run("Container status", compose.invocation(project, &["ps"])),
        ],
        endpoints: config.services.clone(),
    }
}

#[must_use]
pub fn local_down(project: &ProjectConfig, compose: ComposeCommand) -> Plan {
    Plan {
        name: "down".to_string(),
        steps: vec![Step::run("Stopping containers", compose.invocation(project, &["down"]))],
        endpoints: Vec::new(),
    }
}

#[must_use]
pub fn local_ps(project: &ProjectConfig, compose: ComposeCommand, json: bool) -> Invocation {
    if json {
        compose.invocation(project, &["ps", "--format", "json"])
    } else {
        compose.invocation(project, &["ps"])
    }
}

/// `compose logs` with optional tail, follow, and service filter.
#[must_use]
pub fn logs_args(tail: Option<u32>, follow: bool, services: &[String]) -> Vec<String> {
    let mut args = vec!["logs".to_string()];
    if let Some(n) = tail {
        args.push("--tail".to_string());
        args.push(n.to_string());
    }
    if follow {
        args.push("--follow".to_string());
    }
    args.extend(services.iter().cloned());
    args
}

#[must_use]
pub fn local_logs(project: &ProjectConfig, compose: ComposeCommand, args: &[String]) -> Invocation {
    let refs: Vec<&str> = args.iter().map(String::as_str).collect();
    compose.invocation(project, &refs)
}

// ── Remote plans ──────────────────────────────────────────────────────────────

/// `cd <path> && <compose sub1> && <compose sub2> ...`
#[must_use]
pub fn remote_compose_script(
    remote: &RemoteTarget,
    compose: ComposeCommand,
    compose_file: &str,
    subcommands: &[&[&str]],
) -> String {
    let mut parts = vec![format!("cd {}", shell::quote_remote_path(&remote.path))];
    parts.extend(
        subcommands
            .iter()
            .map(|sub| compose.remote_command(compose_file, sub)),
    );
    parts.join(" && ")
}

/// Copy the project to the remote host, then stop, pull, rebuild and start
/// the stack there.
#[must_use]
pub fn remote_deploy(remote: &RemoteTarget, project: &ProjectConfig, compose: ComposeCommand) -> Plan {
    let script = remote_compose_script(
        remote,
        compose,
        &project.compose_file,
        &[&["down"], &["pull"], &["up", "--build", "-d"]],
    );
    Plan {
        name: "remote deploy".to_string(),
        steps: vec![
            Step::run(
                &format!("Copying {} to {}", project.dir.display(), remote.destination()),
                remote.scp_upload(&project.dir),
            ),
            Step::run(
                &format!("Redeploying on {}", remote.destination()),
                remote.ssh(&script),
            ),
        ],
        endpoints: Vec::new(),
    }
}

#[must_use]
pub fn remote_down(remote: &RemoteTarget, project: &ProjectConfig, compose: ComposeCommand) -> Plan {
    let script = remote_compose_script(remote, compose, &project.compose_file, &[&["down"]]);
    Plan {
        name: "remote down".to_string(),
        steps: vec![Step::run(
            &format!("Stopping containers on {}", remote.destination()),
            remote.ssh(&script),
        )],
        endpoints: Vec::new(),
    }
}

#[must_use]
pub fn remote_compose(
    remote: &RemoteTarget,
    project: &ProjectConfig,
    compose: ComposeCommand,
    subcommand: &[&str],
) -> Invocation {
    remote.ssh(&remote_compose_script(
        remote,
        compose,
        &project.compose_file,
        &[subcommand],
    ))
}
