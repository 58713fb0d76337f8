//! JSON output helpers.
//!
//! Every `--json` code path writes exactly one pretty-printed document to
//! stdout. Failures are reported with [`format_error`].

use std::path::Path;

use anyhow::{Context, Result};
use deployctl_common::MonitorReport;
use serde::Serialize;

use crate::domain::config::DeployConfig;
use crate::domain::error::{ConfigError, DeployError, RemoteError};
use crate::domain::health::DoctorChecks;

/// Renders domain types as JSON on stdout.
pub struct JsonRenderer;

impl JsonRenderer {
    /// Serialize any value as pretty JSON and print it.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render<T: Serialize + ?Sized>(value: &T) -> Result<()> {
        println!("{}", to_pretty(value)?);
        Ok(())
    }

    /// One monitor round. In watch mode each round is printed as a single
    /// compact line so the stream stays line-delimited.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_monitor(report: &MonitorReport) -> Result<()> {
        println!(
            "{}",
            serde_json::to_string(report).context("JSON serialization failed")?
        );
        Ok(())
    }

    /// Doctor checks together with the derived issue list.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_doctor(checks: &DoctorChecks, issues: &[String]) -> Result<()> {
        Self::render(&serde_json::json!({
            "healthy": issues.is_empty(),
            "checks": checks,
            "issues": issues,
        }))
    }

    /// Effective configuration and the file it is read from.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_config(config: &DeployConfig, path: &Path) -> Result<()> {
        Self::render(&serde_json::json!({
            "path": path.display().to_string(),
            "config": config,
        }))
    }

    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn render_version(version: &str) -> Result<()> {
        Self::render(&serde_json::json!({ "version": version }))
    }
}

fn to_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("JSON serialization failed")
}

/// Format a JSON error object.
///
/// Output (pretty-printed):
/// ```json
/// {
///   "error": true,
///   "message": "...",
///   "code": "..."
/// }
/// ```
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn format_error(message: &str, code: &str) -> Result<String> {
    let obj = serde_json::json!({
        "error": true,
        "message": message,
        "code": code,
    });
    to_pretty(&obj)
}

/// Machine-readable code for the `code` field of [`format_error`].
#[must_use]
pub fn error_code(err: &anyhow::Error) -> &'static str {
    if let Some(e) = err.downcast_ref::<DeployError>() {
        return e.code();
    }
    if let Some(e) = err.downcast_ref::<RemoteError>() {
        return match e {
            RemoteError::HostNotConfigured | RemoteError::KeyNotConfigured => {
                "REMOTE_NOT_CONFIGURED"
            }
            _ => "INVALID_REMOTE",
        };
    }
    if err.downcast_ref::<ConfigError>().is_some() {
        return "INVALID_CONFIG";
    }
    "ERROR"
}
