//! Shared test helpers: mock port implementations and output constructors.

#![allow(dead_code, clippy::expect_used)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Output};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use deployctl_cli::application::ports::{
    CommandRunner, ConfigStore, HttpProbe, LocalFs, ProgressReporter,
};
use deployctl_cli::domain::config::DeployConfig;

// ── Cross-platform ExitStatus construction ───────────────────────────────────

/// Build an `ExitStatus` from a logical exit code (0 = success, non-zero = failure).
///
/// On Unix the raw wait-status encodes the exit code in bits 8–15, so we shift.
/// On Windows `ExitStatusExt::from_raw` takes the exit code directly.
#[cfg(unix)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::unix::process::ExitStatusExt;
    ExitStatus::from_raw(code << 8)
}

#[cfg(windows)]
pub fn exit_status(code: i32) -> ExitStatus {
    use std::os::windows::process::ExitStatusExt;
    #[allow(clippy::cast_sign_loss)]
    ExitStatus::from_raw(code as u32)
}

// ── Output constructors ──────────────────────────────────────────────────────

pub fn ok_output(stdout: &[u8]) -> Output {
    Output {
        status: exit_status(0),
        stdout: stdout.to_vec(),
        stderr: Vec::new(),
    }
}

pub fn err_output(code: i32, stderr: &[u8]) -> Output {
    Output {
        status: exit_status(code),
        stdout: Vec::new(),
        stderr: stderr.to_vec(),
    }
}

pub fn not_found() -> anyhow::Error {
    anyhow::Error::from(std::io::Error::from(std::io::ErrorKind::NotFound))
        .context("failed to spawn")
}

// ── Mock: recording command runner ───────────────────────────────────────────

/// How a call reached the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Captured,
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub kind: CallKind,
    /// Program followed by its arguments.
    pub argv: Vec<String>,
}

type Responder = Box<dyn Fn(&[String]) -> Result<Output> + Send + Sync>;

/// Records every invocation and answers from a closure over the argv.
pub struct RecordingRunner {
    calls: Mutex<Vec<Call>>,
    respond: Responder,
}

impl RecordingRunner {
    pub fn new(respond: impl Fn(&[String]) -> Result<Output> + Send + Sync + 'static) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        }
    }

    /// Every command exits 0 with empty output.
    pub fn succeeding() -> Self {
        Self::new(|_| Ok(ok_output(b"")))
    }

    /// Commands whose argv joined by spaces contains `needle` exit with `code`.
    pub fn failing_on(needle: &'static str, code: i32) -> Self {
        Self::new(move |argv| {
            if argv.join(" ").contains(needle) {
                Ok(err_output(code, b"boom"))
            } else {
                Ok(ok_output(b""))
            }
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("lock").clone()
    }

    /// Argv of pass-through calls, joined with spaces.
    pub fn passthrough_lines(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.kind == CallKind::Passthrough)
            .map(|c| c.argv.join(" "))
            .collect()
    }

    fn record(&self, kind: CallKind, program: &str, args: &[&str]) -> Result<Output> {
        let argv: Vec<String> = std::iter::once(program)
            .chain(args.iter().copied())
            .map(String::from)
            .collect();
        self.calls.lock().expect("lock").push(Call {
            kind,
            argv: argv.clone(),
        });
        (self.respond)(&argv)
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<Output> {
        self.record(CallKind::Captured, program, args)
    }

    async fn run_with_timeout(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> Result<Output> {
        self.record(CallKind::Captured, program, args)
    }

    async fn run_status(&self, program: &str, args: &[&str]) -> Result<ExitStatus> {
        self.record(CallKind::Passthrough, program, args)
            .map(|o| o.status)
    }
}

// ── Mock: no-op progress reporter ────────────────────────────────────────────

pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
}

/// Collects warnings so tests can assert on them.
#[derive(Default)]
pub struct CollectingReporter {
    pub warnings: Mutex<Vec<String>>,
}

impl ProgressReporter for CollectingReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, message: &str) {
        self.warnings.lock().expect("lock").push(message.to_string());
    }
}

// ── Mock: HTTP probe ─────────────────────────────────────────────────────────

/// Answers by URL suffix; unknown URLs fail like a refused connection.
#[derive(Default)]
pub struct MockProbe {
    pub statuses: HashMap<String, u16>,
    pub requested: Mutex<Vec<(String, Duration)>>,
}

impl MockProbe {
    pub fn with(mut self, path: &str, status: u16) -> Self {
        self.statuses.insert(path.to_string(), status);
        self
    }
}

impl HttpProbe for MockProbe {
    async fn get_status(&self, url: &str, timeout: Duration) -> Result<u16> {
        self.requested
            .lock()
            .expect("lock")
            .push((url.to_string(), timeout));
        self.statuses
            .iter()
            .find(|(path, _)| url.ends_with(path.as_str()))
            .map(|(_, status)| *status)
            .ok_or_else(|| anyhow::anyhow!("Connection refused"))
    }
}

// ── Mock: filesystem ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockFs {
    /// Existing files and their mode bits.
    pub files: HashMap<PathBuf, u32>,
}

impl MockFs {
    pub fn with_file(mut self, path: impl Into<PathBuf>, mode: u32) -> Self {
        self.files.insert(path.into(), mode);
        self
    }
}

impl LocalFs for MockFs {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn mode(&self, path: &Path) -> Result<Option<u32>> {
        Ok(self.files.get(path).copied())
    }
}

// ── Mock: in-memory config store ─────────────────────────────────────────────

#[derive(Default)]
pub struct MemoryConfigStore {
    pub stored: Mutex<Option<DeployConfig>>,
    pub saves: Mutex<usize>,
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<DeployConfig> {
        Ok(self.stored.lock().expect("lock").clone().unwrap_or_default())
    }

    fn save(&self, config: &DeployConfig) -> Result<()> {
        *self.stored.lock().expect("lock") = Some(config.clone());
        *self.saves.lock().expect("lock") += 1;
        Ok(())
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(PathBuf::from("/mem/config.yaml"))
    }
}
