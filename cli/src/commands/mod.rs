//! Command implementations

pub mod config;
pub mod doctor;
pub mod down;
pub mod logs;
pub mod monitor;
pub mod remote;
pub mod status;
pub mod up;
pub mod version;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::services::compose_detect::resolve_compose;
use crate::application::services::plan_runner::{RunOptions, execute_plan, run_passthrough};
use crate::domain::compose::{ComposeCommand, ComposeVariant};
use crate::domain::config::DeployConfig;
use crate::domain::plan::{Invocation, Plan};

/// `--compose` override shared by every command that runs compose.
#[derive(Args, Debug, Clone, Default)]
pub struct ComposeArgs {
    /// Compose CLI to use: auto, standalone (docker-compose) or plugin (docker compose)
    #[arg(long, value_name = "CLI")]
    pub compose: Option<ComposeVariant>,
}

impl ComposeArgs {
    /// Flag value, falling back to `project.compose_command`.
    #[must_use]
    pub fn variant(&self, config: &DeployConfig) -> ComposeVariant {
        self.compose.unwrap_or(config.project.compose_command)
    }

    /// Resolve the local compose CLI, probing when the variant is `auto`.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::ComposeNotFound` when probing finds nothing and
    /// this is not a dry run.
    pub async fn resolve_local(&self, app: &AppContext, config: &DeployConfig) -> Result<ComposeCommand> {
        resolve_compose(&app.runner, &app.reporter(), self.variant(config), app.dry_run).await
    }
}

/// Run one pass-through command, or list it under `--dry-run`.
pub(crate) async fn passthrough(
    app: &AppContext,
    name: &str,
    label: &str,
    invocation: Invocation,
) -> Result<()> {
    if app.dry_run {
        let plan = Plan::single(name, label, invocation);
        let opts = RunOptions {
            dry_run: true,
            keep_going: false,
        };
        let report = execute_plan(&app.runner, &app.reporter(), &plan, opts).await?;
        return app.renderer().render_report(&report);
    }
    run_passthrough(&app.runner, label, &invocation).await
}
