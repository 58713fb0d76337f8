//! Typed domain error enums.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use thiserror::Error;

// ── Deploy errors ─────────────────────────────────────────────────────────────

/// Errors raised while running a deployment plan.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("Step '{step}' failed ({}): {command}", exit_display(*.code))]
    StepFailed {
        step: String,
        command: String,
        code: Option<i32>,
    },

    #[error("'{program}' not found on PATH. Run 'deployctl doctor' for details.")]
    ToolMissing { program: String },

    #[error("No compose command found. Install docker-compose or the docker compose plugin.")]
    ComposeNotFound,

    #[error("Key file not found: {0}")]
    KeyFileMissing(String),

    #[error("Deployment to {0} cancelled.")]
    Cancelled(String),
}

impl DeployError {
    /// Stable machine-readable code for `--json` error output.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::StepFailed { .. } => "STEP_FAILED",
            Self::ToolMissing { .. } => "TOOL_MISSING",
            Self::ComposeNotFound => "COMPOSE_NOT_FOUND",
            Self::KeyFileMissing(_) => "KEY_FILE_MISSING",
            Self::Cancelled(_) => "CANCELLED",
        }
    }
}

fn exit_display(code: Option<i32>) -> String {
    match code {
        Some(c) => format!("exit code {c}"),
        None => "terminated by signal".to_string(),
    }
}

// ── Remote errors ─────────────────────────────────────────────────────────────

/// Errors related to the remote host settings.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("No remote host configured. Set one with: deployctl config set remote.host <host>")]
    HostNotConfigured,

    #[error("No key file configured. Set one with: deployctl config set remote.key_file <path>")]
    KeyNotConfigured,

    #[error("Invalid remote host '{0}'")]
    InvalidHost(String),

    #[error("Invalid remote user '{0}'")]
    InvalidUser(String),

    #[error("Remote user given twice: host '{host}' already names a user and remote.user is '{user}'")]
    AmbiguousUser { host: String, user: String },

    #[error("Remote path must not be empty")]
    EmptyPath,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration key/value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Unknown setting: {key}\n\nValid settings: {valid}")]
    UnknownKey { key: String, valid: String },

    #[error("Invalid value for {key}: {value}\n\nValid values: {valid}")]
    InvalidValue {
        key: String,
        value: String,
        valid: String,
    },
}
