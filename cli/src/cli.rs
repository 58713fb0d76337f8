//! CLI argument parsing with clap derive

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::app::{AppContext, AppFlags, BehaviourFlags, OutputFlags};
use crate::commands;

/// Build, start and ship a docker compose stack, locally or over ssh
#[derive(Parser)]
#[command(
    name = "deployctl",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (any `NO_COLOR` value does the same)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Config file (default: $DEPLOYCTL_CONFIG, ./deployctl.yaml, ~/.deployctl/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the commands that would run without running them
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Answer yes to prompts
    #[arg(short, long, global = true)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Stop, rebuild and start the local stack, then list containers
    Up(commands::up::UpArgs),

    /// Stop the local stack
    Down(commands::down::DownArgs),

    /// Show container status
    Status(commands::status::StatusArgs),

    /// Show container logs
    Logs(commands::logs::LocalLogsArgs),

    /// Deploy to or inspect a remote host
    #[command(subcommand)]
    Remote(commands::remote::RemoteCommand),

    /// Check API endpoint health
    Monitor(commands::monitor::MonitorArgs),

    /// Diagnose issues
    Doctor,

    /// Manage configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),

    /// Show version
    Version,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<ExitCode> {
        let Cli {
            json,
            quiet,
            no_color,
            verbose,
            config,
            dry_run,
            yes,
            command,
        } = self;

        let app = AppContext::new(&AppFlags {
            output: OutputFlags {
                no_color,
                quiet,
                json,
            },
            behaviour: BehaviourFlags {
                yes,
                dry_run,
                config,
            },
        });

        match command {
            Command::Up(args) => commands::up::run(&app, &args).await,
            Command::Down(args) => commands::down::run(&app, &args).await,
            Command::Status(args) => commands::status::run(&app, &args).await,
            Command::Logs(args) => commands::logs::run(&app, &args).await,
            Command::Remote(cmd) => commands::remote::run(&app, cmd).await,
            Command::Monitor(args) => commands::monitor::run(&app, &args).await,
            Command::Doctor => commands::doctor::run(&app, verbose > 0).await,
            Command::Config(cmd) => commands::config::run(&app, cmd),
            Command::Version => commands::version::run(&app),
        }
    }
}
