//! Parsing of `compose ps --format json` output.
//!
//! Compose v2 releases disagree on the shape: older ones print one JSON
//! array, newer ones print one object per line.

use anyhow::{Context, Result};
use deployctl_common::{ContainerState, ServiceStatus};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct PsRow {
    #[serde(default)]
    name: String,
    #[serde(default)]
    service: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    status: Option<String>,
}

impl From<PsRow> for ServiceStatus {
    fn from(row: PsRow) -> Self {
        Self {
            name: row.name,
            service: row.service,
            state: ContainerState::from_compose(&row.state),
            status: row.status.filter(|s| !s.is_empty()),
        }
    }
}

/// Parse `compose ps --format json` stdout.
///
/// # Errors
///
/// Returns an error if the output is neither a JSON array nor JSON lines.
pub fn parse_ps_json(stdout: &str) -> Result<Vec<ServiceStatus>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        let rows: Vec<PsRow> =
            serde_json::from_str(trimmed).context("cannot parse compose ps output")?;
        return Ok(rows.into_iter().map(Into::into).collect());
    }
    trimmed
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|line| {
            serde_json::from_str::<PsRow>(line)
                .map(Into::into)
                .with_context(|| format!("cannot parse compose ps line: {line}"))
        })
        .collect()
}
