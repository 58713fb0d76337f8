//! `deployctl status`: list the containers of the local stack.
//!
//! Human mode passes `compose ps` straight through. JSON mode captures
//! `compose ps --format json` and renders the parsed rows.

use std::process::ExitCode;

use anyhow::Result;
use chrono::Utc;
use clap::Args;
use deployctl_common::StatusOutput;

use crate::app::AppContext;
use crate::application::services::stack_status;
use crate::commands::{ComposeArgs, passthrough};
use crate::domain::plan;

#[derive(Args, Debug, Default)]
pub struct StatusArgs {
    #[command(flatten)]
    pub compose: ComposeArgs,
}

/// Run the status command.
///
/// # Errors
///
/// Returns an error if compose cannot be found, `ps` fails, or its JSON
/// cannot be parsed.
pub async fn run(app: &AppContext, args: &StatusArgs) -> Result<ExitCode> {
    let config = app.config()?;
    let compose = args.compose.resolve_local(app, &config).await?;

    if app.is_json() && !app.dry_run {
        let services = stack_status::local_services(&app.runner, &config.project, compose).await?;
        app.renderer().render_status(&StatusOutput {
            target: "local".to_string(),
            services,
            checked_at: Utc::now(),
        })?;
        return Ok(ExitCode::SUCCESS);
    }

    let inv = plan::local_ps(&config.project, compose, false);
    passthrough(app, "status", "Container status", inv).await?;
    Ok(ExitCode::SUCCESS)
}
