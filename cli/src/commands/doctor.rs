//! `deployctl doctor`: check the tools and settings deploys depend on.

use std::process::ExitCode;

use anyhow::Result;

use crate::app::AppContext;
use crate::application::services::doctor::run_doctor;
use crate::domain::health::collect_issues;
use crate::output::{SpinnerReporter, progress};

/// Run the doctor command. Exits non-zero when any issue is found.
///
/// # Errors
///
/// Returns an error if configuration cannot be loaded or a probe fails
/// unexpectedly.
pub async fn run(app: &AppContext, verbose: bool) -> Result<ExitCode> {
    let config = app.config()?;

    let pb = progress::spinner_if(app.output.show_progress(), "Running health checks...");
    let checks = run_doctor(
        &app.runner,
        &app.fs,
        &SpinnerReporter::new(&pb),
        &config,
        app.home.as_deref(),
    )
    .await;
    progress::finish_clear(&pb);
    let checks = checks?;

    let issues = collect_issues(&checks);
    app.renderer().render_doctor(&checks, &issues, verbose)?;

    Ok(if issues.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
