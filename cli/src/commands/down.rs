//! `deployctl down`: stop the local stack.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::deploy;
use crate::application::services::plan_runner::ensure_succeeded;
use crate::commands::ComposeArgs;

#[derive(Args, Debug, Default)]
pub struct DownArgs {
    #[command(flatten)]
    pub compose: ComposeArgs,
}

/// Run the down command.
///
/// # Errors
///
/// Returns an error if compose cannot be found or `compose down` fails.
pub async fn run(app: &AppContext, args: &DownArgs) -> Result<ExitCode> {
    let config = app.config()?;
    let compose = args.compose.resolve_local(app, &config).await?;
    let report = deploy::stop_local(
        &app.runner,
        &app.reporter(),
        &config.project,
        compose,
        app.run_options(false),
    )
    .await?;
    app.renderer().render_report(&report)?;
    ensure_succeeded(&report)?;
    Ok(ExitCode::SUCCESS)
}
