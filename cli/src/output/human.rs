//! Human-readable terminal renderer.

use std::path::Path;

use deployctl_common::{
    ContainerState, DeployReport, EndpointCheck, MonitorReport, ProbeOutcome, StatusOutput,
    StepOutcome,
};
use owo_colors::OwoColorize as _;

use crate::domain::config::DeployConfig;
use crate::domain::health::{DoctorChecks, KeyFileState};
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version information.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        self.ctx.info(&format!("deployctl v{version}"));
    }

    /// Render a plan report.
    ///
    /// Dry runs list every command that would run. Real runs already
    /// streamed their progress, so only skipped steps and, on success, the
    /// service endpoints are printed.
    pub fn render_report(&self, report: &DeployReport) {
        if self.ctx.quiet {
            return;
        }
        if report.dry_run {
            println!();
            self.ctx
                .header(&format!("Dry run: {} ({} steps)", report.plan, report.steps.len()));
            for (i, step) in report.steps.iter().enumerate() {
                println!("  {:>2}. {}", i + 1, step.label);
                if let Some(cmd) = &step.command {
                    println!("      {}", cmd.style(self.ctx.styles.command));
                }
            }
            println!();
            return;
        }

        let skipped: Vec<&str> = report
            .steps
            .iter()
            .filter(|s| s.outcome == StepOutcome::Skipped)
            .map(|s| s.label.as_str())
            .collect();
        if !skipped.is_empty() {
            self.ctx.warn(&format!("Skipped: {}", skipped.join(", ")));
        }
        if !report.succeeded() {
            return;
        }

        self.ctx.success(&format!("{} complete", capitalize(&report.plan)));
        if !report.endpoints.is_empty() {
            println!();
            self.ctx.header("Services:");
            let width = report
                .endpoints
                .iter()
                .map(|e| e.name.len() + 1)
                .max()
                .unwrap_or(0);
            for endpoint in &report.endpoints {
                self.ctx
                    .kv(&format!("{:<width$}", format!("{}:", endpoint.name)), &endpoint.url);
            }
            println!();
        }
    }

    /// Render container status as a table.
    pub fn render_status(&self, status: &StatusOutput) {
        if status.services.is_empty() {
            self.ctx.info(&format!("No containers running ({})", status.target));
            return;
        }
        println!();
        self.ctx.header(&format!("Containers ({})", status.target));
        println!();
        let name_w = column_width(status.services.iter().map(|s| s.service.as_str()), "SERVICE");
        let cont_w = column_width(status.services.iter().map(|s| s.name.as_str()), "CONTAINER");
        println!(
            "  {:<name_w$}  {:<cont_w$}  {:<10}  {}",
            "SERVICE".style(self.ctx.styles.dim),
            "CONTAINER".style(self.ctx.styles.dim),
            "STATE".style(self.ctx.styles.dim),
            "STATUS".style(self.ctx.styles.dim),
        );
        for svc in &status.services {
            let state = container_state_display(svc.state);
            let style = if svc.state == ContainerState::Running {
                self.ctx.styles.success
            } else {
                self.ctx.styles.warning
            };
            println!(
                "  {:<name_w$}  {:<cont_w$}  {:<10}  {}",
                svc.service,
                svc.name,
                state.style(style),
                svc.status.as_deref().unwrap_or(""),
            );
        }
        println!();
    }

    /// Render one monitor round, one line per endpoint.
    pub fn render_monitor(&self, report: &MonitorReport) {
        println!(
            "\n  {} {}",
            "Checking".style(self.ctx.styles.header),
            format!(
                "{} at {}",
                report.api_url,
                report.checked_at.format("%Y-%m-%d %H:%M:%S")
            )
            .style(self.ctx.styles.dim)
        );
        for check in &report.checks {
            let mark = if check.is_healthy() {
                "✓".style(self.ctx.styles.success).to_string()
            } else {
                "✗".style(self.ctx.styles.error).to_string()
            };
            println!("  {mark} {}", format_check_line(check));
        }
    }

    /// Render the effective configuration.
    pub fn render_config(&self, config: &DeployConfig, path: &Path) {
        println!();
        println!(
            "  {}",
            format!("Configuration ({})", path.display()).style(self.ctx.styles.header)
        );
        println!();
        for (key, value) in config_rows(config) {
            println!("  {:<24} {value}", format!("{key}:"));
        }
        if !config.services.is_empty() {
            println!();
            println!("  {}", "Services:".style(self.ctx.styles.bold));
            for endpoint in &config.services {
                println!("    {:<22} {}", format!("{}:", endpoint.name), endpoint.url);
            }
        }
        println!();
        println!("  {}", "Environment:".style(self.ctx.styles.bold));
        for var in ["DEPLOYCTL_CONFIG", "DEPLOYCTL_REMOTE_HOST", "NO_COLOR"] {
            println!(
                "    {:<22} {}",
                format!("{var}:"),
                std::env::var(var).unwrap_or_else(|_| "(not set)".to_string())
            );
        }
        println!();
    }

    /// Render doctor health check results.
    pub fn render_doctor(&self, checks: &DoctorChecks, issues: &[String], verbose: bool) {
        println!();
        println!("  {}", "deployctl health check".style(self.ctx.styles.header));
        println!();

        println!("  Tools:");
        for tool in &checks.tools {
            let scope = if tool.remote_only { " (remote deploys)" } else { "" };
            match (&tool.version, tool.found) {
                (Some(v), true) => self.print_check(true, &format!("{v}{scope}")),
                (None, true) => self.print_check(true, &format!("{}{scope}", tool.name)),
                (_, false) => self.print_check(false, &format!("{} not found{scope}", tool.name)),
            }
        }
        match &checks.compose {
            Some(c) => self.print_check(true, c),
            None => self.print_check(false, "no compose command"),
        }
        println!();

        println!("  Project:");
        self.print_check(
            checks.project.compose_file_found,
            &checks.project.compose_file,
        );
        println!();

        println!("  Remote:");
        match &checks.remote.host {
            Some(host) => self.print_check(true, &format!("host {host}")),
            None => println!(
                "    {} no remote host configured",
                "-".style(self.ctx.styles.dim)
            ),
        }
        match &checks.remote.key_file {
            KeyFileState::NotConfigured => println!(
                "    {} no key file configured",
                "-".style(self.ctx.styles.dim)
            ),
            KeyFileState::Missing { path } => self.print_check(false, &format!("{path} missing")),
            KeyFileState::TooOpen { path, mode } => {
                self.print_check(false, &format!("{path} has mode {mode:o}"));
            }
            KeyFileState::Ok { path } => self.print_check(true, path),
        }

        println!();
        if issues.is_empty() {
            println!(
                "  {} Everything looks good!",
                "✓".style(self.ctx.styles.success)
            );
        } else {
            let hint = if verbose {
                ""
            } else {
                " Run with --verbose for details."
            };
            println!(
                "  {} Found {} issues.{hint}",
                "✗".style(self.ctx.styles.error),
                issues.len(),
            );
            if verbose {
                println!();
                for issue in issues {
                    println!("    {} {issue}", "✗".style(self.ctx.styles.error));
                }
            }
        }
        println!();
    }

    fn print_check(&self, ok: bool, msg: &str) {
        if ok {
            println!("    {} {msg}", "✓".style(self.ctx.styles.success));
        } else {
            println!("    {} {msg}", "✗".style(self.ctx.styles.error));
        }
    }
}

// ── Display helpers (used by tests and output layer) ─────────────────────────

/// `<path padded to 30> - <status> (<ms>ms)` or `<path> - Error: <message>`.
#[must_use]
pub fn format_check_line(check: &EndpointCheck) -> String {
    match &check.outcome {
        ProbeOutcome::Response {
            status,
            duration_ms,
        } => format!("{:<30} - {status} ({duration_ms:.2}ms)", check.path),
        ProbeOutcome::Error { message } => format!("{:<30} - Error: {message}", check.path),
    }
}

#[must_use]
pub fn container_state_display(state: ContainerState) -> &'static str {
    match state {
        ContainerState::Running => "running",
        ContainerState::Restarting => "restarting",
        ContainerState::Paused => "paused",
        ContainerState::Created => "created",
        ContainerState::Exited => "exited",
        ContainerState::Dead => "dead",
        ContainerState::Unknown => "unknown",
    }
}

/// Flattened `key: value` rows for `config show`, in `VALID_CONFIG_KEYS` order.
#[must_use]
pub fn config_rows(config: &DeployConfig) -> Vec<(&'static str, String)> {
    let unset = || "(not set)".to_string();
    vec![
        ("project.dir", config.project.dir.display().to_string()),
        ("project.compose_file", config.project.compose_file.clone()),
        (
            "project.compose_command",
            config.project.compose_command.to_string(),
        ),
        ("remote.host", config.remote.host.clone().unwrap_or_else(unset)),
        ("remote.user", config.remote.user.clone().unwrap_or_else(unset)),
        ("remote.port", config.remote.port.to_string()),
        (
            "remote.key_file",
            config
                .remote
                .key_file
                .as_ref()
                .map_or_else(unset, |p| p.display().to_string()),
        ),
        ("remote.path", config.remote.path.clone()),
        ("startup.wait_secs", config.startup.wait_secs.to_string()),
        ("monitor.api_url", config.monitor.api_url.clone()),
        (
            "monitor.interval_secs",
            config.monitor.interval_secs.to_string(),
        ),
        (
            "monitor.timeout_secs",
            config.monitor.timeout_secs.to_string(),
        ),
    ]
}

fn column_width<'s>(values: impl Iterator<Item = &'s str>, header: &str) -> usize {
    values.map(str::len).chain([header.len()]).max().unwrap_or(0)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
