//! Domain types and validators for deployctl configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::compose::ComposeVariant;
use crate::domain::error::ConfigError;
use deployctl_common::Endpoint;

// ── Constants ────────────────────────────────────────────────────────────────

pub const VALID_CONFIG_KEYS: &[&str] = &[
    "project.dir",
    "project.compose_file",
    "project.compose_command",
    "remote.host",
    "remote.user",
    "remote.port",
    "remote.key_file",
    "remote.path",
    "startup.wait_secs",
    "monitor.api_url",
    "monitor.interval_secs",
    "monitor.timeout_secs",
];

pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yml";
pub const DEFAULT_SSH_PORT: u16 = 22;

/// Environment variables that override the loaded file.
pub const ENV_REMOTE_HOST: &str = "DEPLOYCTL_REMOTE_HOST";
pub const ENV_REMOTE_USER: &str = "DEPLOYCTL_REMOTE_USER";
pub const ENV_REMOTE_KEY: &str = "DEPLOYCTL_REMOTE_KEY";
pub const ENV_REMOTE_PATH: &str = "DEPLOYCTL_REMOTE_PATH";

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `deployctl.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeployConfig {
    pub project: ProjectConfig,
    pub remote: RemoteConfig,
    pub startup: StartupConfig,
    /// URLs announced after a successful `up`.
    pub services: Vec<Endpoint>,
    pub monitor: MonitorConfig,
}

/// Local compose project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Directory holding the compose file. Also the directory copied to the
    /// remote host.
    pub dir: PathBuf,
    pub compose_file: String,
    pub compose_command: ComposeVariant,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            compose_file: DEFAULT_COMPOSE_FILE.to_string(),
            compose_command: ComposeVariant::Auto,
        }
    }
}

impl ProjectConfig {
    /// `true` when compose can be run with no `-f`/`--project-directory` flags.
    #[must_use]
    pub fn is_default_location(&self) -> bool {
        self.dir == std::path::Path::new(".") && self.compose_file == DEFAULT_COMPOSE_FILE
    }

    /// Path of the compose file relative to the working directory.
    #[must_use]
    pub fn compose_path(&self) -> PathBuf {
        self.dir.join(&self.compose_file)
    }
}

/// Remote host reached with `scp`/`ssh`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    pub port: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_file: Option<PathBuf>,
    /// Destination directory on the remote host.
    pub path: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: None,
            user: None,
            port: DEFAULT_SSH_PORT,
            key_file: None,
            path: "~/app".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StartupConfig {
    /// Fixed pause between `up` and `ps`.
    pub wait_secs: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self { wait_secs: 10 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MonitorConfig {
    pub api_url: String,
    pub endpoints: Vec<String>,
    pub interval_secs: u64,
    pub timeout_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8000".to_string(),
            endpoints: [
                "/api/health",
                "/api/sales/summary",
                "/api/customers/rfm/stats/overview",
                "/api/forecast/summary",
            ]
            .map(String::from)
            .to_vec(),
            interval_secs: 60,
            timeout_secs: 10,
        }
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            project: ProjectConfig::default(),
            remote: RemoteConfig::default(),
            startup: StartupConfig::default(),
            services: default_services(),
            monitor: MonitorConfig::default(),
        }
    }
}

fn default_services() -> Vec<Endpoint> {
    vec![
        Endpoint {
            name: "Backend".to_string(),
            url: "http://localhost:8000".to_string(),
        },
        Endpoint {
            name: "Frontend".to_string(),
            url: "http://localhost:3000".to_string(),
        },
    ]
}

// ── Validators ───────────────────────────────────────────────────────────────

/// Validates a configuration key against the whitelist.
///
/// # Errors
///
/// Returns an error if the key is not in the allowed list.
pub fn validate_config_key(key: &str) -> Result<()> {
    if !VALID_CONFIG_KEYS.contains(&key) {
        return Err(ConfigError::UnknownKey {
            key: key.to_string(),
            valid: VALID_CONFIG_KEYS.join(", "),
        }
        .into());
    }
    Ok(())
}

fn invalid(key: &str, value: &str, valid: &str) -> anyhow::Error {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        valid: valid.to_string(),
    }
    .into()
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str, valid: &str) -> Result<T> {
    value.parse().map_err(|_| invalid(key, value, valid))
}

fn optional(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Apply `key = value` to `config`, validating the value for that key.
///
/// An empty value clears optional settings (`remote.host`, `remote.user`,
/// `remote.key_file`).
///
/// # Errors
///
/// Returns an error if the key is unknown or the value is invalid for it.
pub fn apply_setting(config: &mut DeployConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "project.dir" => {
            if value.is_empty() {
                return Err(invalid(key, value, "a non-empty directory path"));
            }
            config.project.dir = PathBuf::from(value);
        }
        "project.compose_file" => {
            if value.is_empty() {
                return Err(invalid(key, value, "a non-empty file name"));
            }
            config.project.compose_file = value.to_string();
        }
        "project.compose_command" => {
            config.project.compose_command = value
                .parse()
                .map_err(|_| invalid(key, value, "auto, standalone, plugin"))?;
        }
        "remote.host" => {
            if let Some(host) = optional(value) {
                crate::domain::remote::validate_host(&host)?;
                config.remote.host = Some(host);
            } else {
                config.remote.host = None;
            }
        }
        "remote.user" => {
            if let Some(user) = optional(value) {
                crate::domain::remote::validate_user(&user)?;
                config.remote.user = Some(user);
            } else {
                config.remote.user = None;
            }
        }
        "remote.port" => {
            let port: u16 = parse_number(key, value, "1-65535")?;
            if port == 0 {
                return Err(invalid(key, value, "1-65535"));
            }
            config.remote.port = port;
        }
        "remote.key_file" => config.remote.key_file = optional(value).map(PathBuf::from),
        "remote.path" => {
            if value.is_empty() {
                return Err(invalid(key, value, "a non-empty remote directory"));
            }
            config.remote.path = value.to_string();
        }
        "startup.wait_secs" => {
            config.startup.wait_secs = parse_number(key, value, "a whole number of seconds")?;
        }
        "monitor.api_url" => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(invalid(key, value, "an http:// or https:// URL"));
            }
            config.monitor.api_url = value.to_string();
        }
        "monitor.interval_secs" | "monitor.timeout_secs" => {
            let secs: u64 = parse_number(key, value, "a positive number of seconds")?;
            if secs == 0 {
                return Err(invalid(key, value, "a positive number of seconds"));
            }
            if key == "monitor.interval_secs" {
                config.monitor.interval_secs = secs;
            } else {
                config.monitor.timeout_secs = secs;
            }
        }
        _ => validate_config_key(key)?,
    }
    Ok(())
}

/// Check the numeric settings a hand-edited file can get wrong. `apply_setting`
/// enforces the same bounds for `config set`.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a zero port, interval or timeout.
pub fn validate_config(config: &DeployConfig) -> Result<()> {
    if config.remote.port == 0 {
        return Err(invalid("remote.port", "0", "1-65535"));
    }
    for (key, secs) in [
        ("monitor.interval_secs", config.monitor.interval_secs),
        ("monitor.timeout_secs", config.monitor.timeout_secs),
    ] {
        if secs == 0 {
            return Err(invalid(key, "0", "a positive number of seconds"));
        }
    }
    Ok(())
}

/// Override remote settings from `DEPLOYCTL_REMOTE_*` variables.
///
/// `lookup` is `std::env::var(..).ok()` in production; tests pass a map.
pub fn apply_env_overrides(config: &mut DeployConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
    if let Some(host) = get(ENV_REMOTE_HOST) {
        config.remote.host = Some(host);
    }
    if let Some(user) = get(ENV_REMOTE_USER) {
        config.remote.user = Some(user);
    }
    if let Some(key) = get(ENV_REMOTE_KEY) {
        config.remote.key_file = Some(PathBuf::from(key));
    }
    if let Some(path) = get(ENV_REMOTE_PATH) {
        config.remote.path = path;
    }
}

// ── Unit tests ───────────────────────────────────────────────────────────────
