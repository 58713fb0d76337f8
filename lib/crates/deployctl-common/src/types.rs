use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of a single compose service container, as reported by `compose ps`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Running,
    Restarting,
    Paused,
    Created,
    Exited,
    Dead,
    Unknown,
}

impl ContainerState {
    /// Map the free-form `State` column of `compose ps` to a variant.
    #[must_use]
    pub fn from_compose(raw: &str) -> Self {
        let lower = raw.trim().to_ascii_lowercase();
        // docker-compose v1 prints "Up", "Up (healthy)", "Exit 0"
        if lower == "running" || lower.starts_with("up") {
            Self::Running
        } else if lower.starts_with("restarting") {
            Self::Restarting
        } else if lower.starts_with("paused") {
            Self::Paused
        } else if lower == "created" {
            Self::Created
        } else if lower.starts_with("exit") {
            Self::Exited
        } else if lower == "dead" {
            Self::Dead
        } else {
            Self::Unknown
        }
    }
}

/// One row of `compose ps`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceStatus {
    /// Container name.
    pub name: String,
    /// Compose service name.
    pub service: String,
    pub state: ContainerState,
    /// Human status text, e.g. `Up 3 minutes (healthy)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

/// `deployctl status --json` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOutput {
    /// `local` or the remote target (`user@host`).
    pub target: String,
    pub services: Vec<ServiceStatus>,
    pub checked_at: DateTime<Utc>,
}

/// A named URL printed after a deploy (backend, frontend, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    pub url: String,
}

/// Result of one executed plan step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum StepOutcome {
    Succeeded,
    /// Process exited non-zero. `code` is `None` when killed by a signal.
    Failed { code: Option<i32> },
    Waited { seconds: u64 },
    /// Not executed because `--dry-run` was set or an earlier step failed.
    Skipped,
}

/// Per-step record in a [`DeployReport`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepReport {
    pub label: String,
    /// Shell rendering of the invocation; `None` for wait steps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// `--json` output of `up`, `down`, and `remote deploy`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployReport {
    pub plan: String,
    pub dry_run: bool,
    pub steps: Vec<StepReport>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub endpoints: Vec<Endpoint>,
    pub finished_at: DateTime<Utc>,
}

impl DeployReport {
    /// `true` when no step failed.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        !self
            .steps
            .iter()
            .any(|s| matches!(s.outcome, StepOutcome::Failed { .. }))
    }
}

/// Outcome of probing one HTTP endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// A response was received (any status code).
    Response { status: u16, duration_ms: f64 },
    /// Connection, DNS or timeout error.
    Error { message: String },
}

/// One endpoint check in a [`MonitorReport`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndpointCheck {
    pub path: String,
    pub url: String,
    #[serde(flatten)]
    pub outcome: ProbeOutcome,
    pub timestamp: DateTime<Utc>,
}

impl EndpointCheck {
    /// Healthy means a `200` response.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Response { status: 200, .. })
    }
}

/// `deployctl monitor --json` output for one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorReport {
    pub api_url: String,
    pub checks: Vec<EndpointCheck>,
    pub checked_at: DateTime<Utc>,
}
