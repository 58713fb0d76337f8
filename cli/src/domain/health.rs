//! Health check domain types and pure diagnostic functions.
//!
//! This module is intentionally free of I/O, async, and external layer imports.
//! All functions take data in and return data out.

use serde::Serialize;

// ── Types ─────────────────────────────────────────────────────────────────────

/// All check categories returned by the doctor command.
#[derive(Debug, Serialize)]
pub struct DoctorChecks {
    /// External programs the scripts rely on.
    pub tools: Vec<ToolCheck>,
    /// Which compose CLI was detected, if any.
    pub compose: Option<String>,
    pub project: ProjectChecks,
    pub remote: RemoteChecks,
}

/// Presence of one external program.
#[derive(Debug, Clone, Serialize)]
pub struct ToolCheck {
    pub name: String,
    pub found: bool,
    /// First line of the version output, when the tool reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Only needed for remote deploys.
    pub remote_only: bool,
}

#[derive(Debug, Serialize)]
pub struct ProjectChecks {
    /// Path that was checked.
    pub compose_file: String,
    pub compose_file_found: bool,
}

#[derive(Debug, Serialize)]
pub struct RemoteChecks {
    pub host: Option<String>,
    pub key_file: KeyFileState,
}

/// State of the configured SSH key file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum KeyFileState {
    NotConfigured,
    Missing { path: String },
    /// Readable by group or others; ssh refuses such keys.
    TooOpen { path: String, mode: u32 },
    Ok { path: String },
}

/// Permission bits that make ssh reject a private key.
pub const KEY_FORBIDDEN_BITS: u32 = 0o077;

/// Classify a key file from its existence and Unix mode.
#[must_use]
pub fn classify_key_file(path: &str, exists: bool, mode: Option<u32>) -> KeyFileState {
    if !exists {
        return KeyFileState::Missing {
            path: path.to_string(),
        };
    }
    match mode {
        Some(m) if m & KEY_FORBIDDEN_BITS != 0 => KeyFileState::TooOpen {
            path: path.to_string(),
            mode: m & 0o777,
        },
        _ => KeyFileState::Ok {
            path: path.to_string(),
        },
    }
}

// ── Issue collection ──────────────────────────────────────────────────────────

/// Collect human-readable issues. Remote-only problems are reported only
/// when a remote host is configured.
#[must_use]
pub fn collect_issues(checks: &DoctorChecks) -> Vec<String> {
    let remote_configured = checks.remote.host.is_some();
    let mut issues = Vec::new();

    for tool in &checks.tools {
        if !tool.found && (!tool.remote_only || remote_configured) {
            issues.push(format!("{} not found on PATH", tool.name));
        }
    }
    if checks.compose.is_none() {
        issues.push("No compose command found (docker-compose or docker compose)".to_string());
    }
    if !checks.project.compose_file_found {
        issues.push(format!("Compose file not found: {}", checks.project.compose_file));
    }
    if remote_configured {
        match &checks.remote.key_file {
            KeyFileState::NotConfigured => {
                issues.push("remote.key_file is not set".to_string());
            }
            KeyFileState::Missing { path } => issues.push(format!("Key file not found: {path}")),
            KeyFileState::TooOpen { path, mode } => issues.push(format!(
                "Key file {path} has mode {mode:o}; run: chmod 600 {path}"
            )),
            KeyFileState::Ok { .. } => {}
        }
    }
    issues
}
