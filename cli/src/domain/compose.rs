//! Compose CLI selection and invocation building.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::config::{DEFAULT_COMPOSE_FILE, ProjectConfig};
use crate::domain::error::ConfigError;
use crate::domain::plan::Invocation;

/// Which compose CLI to use, as configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComposeVariant {
    /// Probe for `docker-compose`, then `docker compose`.
    #[default]
    Auto,
    /// The standalone `docker-compose` binary.
    Standalone,
    /// The `docker compose` plugin.
    Plugin,
}

impl FromStr for ComposeVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "standalone" | "docker-compose" => Ok(Self::Standalone),
            "plugin" | "docker compose" => Ok(Self::Plugin),
            other => Err(ConfigError::InvalidValue {
                key: "compose".to_string(),
                value: other.to_string(),
                valid: "auto, standalone, plugin".to_string(),
            }),
        }
    }
}

impl fmt::Display for ComposeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Standalone => "standalone",
            Self::Plugin => "plugin",
        })
    }
}

impl ComposeVariant {
    /// Resolve without probing. `Auto` falls back to the standalone binary,
    /// which is what the remote host is assumed to have.
    #[must_use]
    pub fn resolve_default(self) -> ComposeCommand {
        match self {
            Self::Auto | Self::Standalone => ComposeCommand::Standalone,
            Self::Plugin => ComposeCommand::Plugin,
        }
    }
}

/// A concrete compose CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeCommand {
    Standalone,
    Plugin,
}

impl ComposeCommand {
    #[must_use]
    pub fn program(self) -> &'static str {
        match self {
            Self::Standalone => "docker-compose",
            Self::Plugin => "docker",
        }
    }

    /// Words to type in a shell, e.g. inside a remote `ssh` command string.
    #[must_use]
    pub fn shell_words(self) -> &'static str {
        match self {
            Self::Standalone => "docker-compose",
            Self::Plugin => "docker compose",
        }
    }

    /// Build a local compose invocation for `project`.
    ///
    /// Project-selection flags are only emitted when the project is not the
    /// default `./docker-compose.yml`.
    #[must_use]
    pub fn invocation(self, project: &ProjectConfig, subcommand: &[&str]) -> Invocation {
        let mut args: Vec<String> = Vec::new();
        if self == Self::Plugin {
            args.push("compose".to_string());
        }
        if !project.is_default_location() {
            args.push("-f".to_string());
            args.push(project.compose_path().display().to_string());
            args.push("--project-directory".to_string());
            args.push(project.dir.display().to_string());
        }
        args.extend(subcommand.iter().map(ToString::to_string));
        Invocation::new(self.program(), args)
    }

    /// Shell text for a compose subcommand run from inside the project
    /// directory on a remote host.
    #[must_use]
    pub fn remote_command(self, compose_file: &str, subcommand: &[&str]) -> String {
        let mut words = vec![self.shell_words().to_string()];
        if compose_file != DEFAULT_COMPOSE_FILE {
            words.push("-f".to_string());
            words.push(crate::domain::shell::quote(compose_file).into_owned());
        }
        words.push(crate::domain::shell::join(subcommand.iter().copied()));
        words.join(" ")
    }
}
