//! `deployctl monitor`: probe the API endpoints once or on an interval.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use deployctl_common::{EndpointCheck, MonitorReport};

use crate::app::AppContext;
use crate::application::services::monitor::check_endpoints;
use crate::domain::config::MonitorConfig;
use crate::output::progress;

#[derive(Args, Debug, Default)]
pub struct MonitorArgs {
    /// Repeat the checks until interrupted with Ctrl-C
    #[arg(short, long)]
    pub watch: bool,

    /// Seconds between rounds in watch mode
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Base URL of the API, overriding monitor.api_url
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,
}

/// Run the monitor command.
///
/// A single round exits non-zero when any endpoint is unhealthy. Watch mode
/// runs until Ctrl-C and then exits zero.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or output fails.
pub async fn run(app: &AppContext, args: &MonitorArgs) -> Result<ExitCode> {
    let mut monitor = app.config()?.monitor;
    if let Some(url) = &args.api_url {
        monitor.api_url.clone_from(url);
    }

    if !args.watch {
        let report = check_round(app, &monitor).await;
        app.renderer().render_monitor(&report)?;
        return Ok(if all_healthy(&report) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let interval = Duration::from_secs(args.interval.unwrap_or(monitor.interval_secs));
    tracing::info!(api_url = %monitor.api_url, interval_secs = interval.as_secs(), "monitoring");
    loop {
        let report = tokio::select! {
            report = check_round(app, &monitor) => report,
            _ = tokio::signal::ctrl_c() => break,
        };
        app.renderer().render_monitor(&report)?;

        tokio::select! {
            () = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    app.output.info("Monitoring stopped");
    Ok(ExitCode::SUCCESS)
}

async fn check_round(app: &AppContext, monitor: &MonitorConfig) -> MonitorReport {
    let pb = progress::spinner_if(
        app.output.show_progress(),
        &format!("Checking {} endpoints...", monitor.endpoints.len()),
    );
    let report = check_endpoints(&app.probe, monitor).await;
    progress::finish_clear(&pb);
    report
}

fn all_healthy(report: &MonitorReport) -> bool {
    report.checks.iter().all(EndpointCheck::is_healthy)
}
