//! Application service: one round of HTTP endpoint checks.

use std::time::{Duration, Instant};

use chrono::Utc;
use deployctl_common::{EndpointCheck, MonitorReport, ProbeOutcome};

use crate::application::ports::HttpProbe;
use crate::domain::config::MonitorConfig;
use crate::domain::monitor::{duration_ms, endpoint_url};

/// Check every configured endpoint in order. Failures are recorded in the
/// report, never returned as errors.
pub async fn check_endpoints(probe: &impl HttpProbe, monitor: &MonitorConfig) -> MonitorReport {
    let timeout = Duration::from_secs(monitor.timeout_secs);
    let mut checks = Vec::with_capacity(monitor.endpoints.len());

    for path in &monitor.endpoints {
        let url = endpoint_url(&monitor.api_url, path);
        let started = Instant::now();
        let outcome = match probe.get_status(&url, timeout).await {
            Ok(status) => ProbeOutcome::Response {
                status,
                duration_ms: duration_ms(started.elapsed()),
            },
            Err(e) => ProbeOutcome::Error {
                message: format!("{e:#}"),
            },
        };
        tracing::debug!(%url, ?outcome, "endpoint checked");
        checks.push(EndpointCheck {
            path: path.clone(),
            url,
            outcome,
            timestamp: Utc::now(),
        });
    }

    MonitorReport {
        api_url: monitor.api_url.clone(),
        checks,
        checked_at: Utc::now(),
    }
}
