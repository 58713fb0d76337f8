//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::process::Output;
use std::time::Duration;

use anyhow::Result;

use crate::domain::DeployConfig;

// ── Command Runner Port ───────────────────────────────────────────────────────

/// Abstracts process execution so infrastructure can be swapped or mocked.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Run a program and capture its output.
    ///
    /// Implementations should delegate to `run_with_timeout` using the
    /// instance's configured default timeout.
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output>;
    /// Run a program with a custom timeout override.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or exceeds `timeout`.
    /// On timeout, the child process must be killed (not left orphaned).
    async fn run_with_timeout(&self, program: &str, args: &[&str], timeout: Duration)
    -> Result<Output>;
    /// Run a program with inherited stdio and return only its exit status.
    /// No timeout: compose builds and remote copies take as long as they take.
    async fn run_status(&self, program: &str, args: &[&str]) -> Result<std::process::ExitStatus>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the Presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts configuration persistence.
pub trait ConfigStore {
    /// Load the configuration, returning defaults if no file exists.
    fn load(&self) -> Result<DeployConfig>;
    /// Persist the configuration.
    fn save(&self, config: &DeployConfig) -> Result<()>;
    /// Path the store reads from and writes to.
    fn path(&self) -> Result<PathBuf>;
}

// ── HTTP Probe Port ───────────────────────────────────────────────────────────

/// Abstracts HTTP GET so endpoint monitoring can be tested without a server.
#[allow(async_fn_in_trait)]
pub trait HttpProbe {
    /// GET `url` and return the response status code (any code, including
    /// 4xx/5xx).
    ///
    /// # Errors
    ///
    /// Returns an error on connection failure, DNS failure, or timeout.
    async fn get_status(&self, url: &str, timeout: Duration) -> Result<u16>;
}

// ── Filesystem Port ───────────────────────────────────────────────────────────

/// Abstracts the local filesystem checks `doctor` and `remote deploy` need.
pub trait LocalFs {
    fn exists(&self, path: &Path) -> bool;
    /// Unix permission bits, or `None` on platforms without them.
    fn mode(&self, path: &Path) -> Result<Option<u32>>;
}
