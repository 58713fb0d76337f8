//! Remote host target: validation and `scp`/`ssh` argument building.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::config::{DEFAULT_SSH_PORT, RemoteConfig};
use crate::domain::error::RemoteError;
use crate::domain::plan::Invocation;
use crate::domain::shell;

// Optional `user@`, then a hostname or IPv4 address. A leading `-` would be
// read by ssh/scp as an option.
static HOST_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // compile-time constant pattern
    Regex::new(r"^(?:[A-Za-z0-9._][A-Za-z0-9._-]*@)?[A-Za-z0-9](?:[A-Za-z0-9.-]*[A-Za-z0-9])?$")
        .expect("valid host regex")
});

static USER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)] // compile-time constant pattern
    Regex::new(r"^[A-Za-z0-9._][A-Za-z0-9._-]*$").expect("valid user regex")
});

/// Validates a remote login name. It must not start with `-`.
///
/// # Errors
///
/// Returns `RemoteError::InvalidUser` for anything but a plain login name.
pub fn validate_user(user: &str) -> Result<(), RemoteError> {
    if USER_RE.is_match(user) {
        Ok(())
    } else {
        Err(RemoteError::InvalidUser(user.to_string()))
    }
}

/// Validates a remote host, optionally prefixed with `user@`.
///
/// # Errors
///
/// Returns `RemoteError::InvalidHost` if `host` is not a plain hostname or
/// IPv4 address.
pub fn validate_host(host: &str) -> Result<(), RemoteError> {
    if HOST_RE.is_match(host) {
        Ok(())
    } else {
        Err(RemoteError::InvalidHost(host.to_string()))
    }
}

/// Expand a leading `~` against `home`.
#[must_use]
pub fn expand_home(path: &Path, home: Option<&Path>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };
    match path.strip_prefix("~") {
        Ok(rest) => home.join(rest),
        Err(_) => path.to_path_buf(),
    }
}

/// A fully configured remote host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTarget {
    pub host: String,
    pub user: Option<String>,
    pub port: u16,
    pub key_file: PathBuf,
    pub path: String,
}

impl RemoteTarget {
    /// Build a target from config, requiring a host and a key file.
    ///
    /// # Errors
    ///
    /// Returns a `RemoteError` when the host or key is missing, the host is
    /// malformed, or the user is given both in `host` and in `user`.
    pub fn from_config(config: &RemoteConfig, home: Option<&Path>) -> Result<Self, RemoteError> {
        let host = config.host.clone().ok_or(RemoteError::HostNotConfigured)?;
        validate_host(&host)?;
        if let Some(user) = &config.user {
            validate_user(user)?;
        }
        if let Some(user) = config.user.as_ref().filter(|_| host.contains('@')) {
            return Err(RemoteError::AmbiguousUser {
                host,
                user: user.clone(),
            });
        }
        let key_file = config
            .key_file
            .as_deref()
            .ok_or(RemoteError::KeyNotConfigured)?;
        if config.path.is_empty() {
            return Err(RemoteError::EmptyPath);
        }
        Ok(Self {
            host,
            user: config.user.clone(),
            port: config.port,
            key_file: expand_home(key_file, home),
            path: config.path.clone(),
        })
    }

    /// `user@host`, or `host` when no separate user is set.
    #[must_use]
    pub fn destination(&self) -> String {
        match &self.user {
            Some(user) => format!("{user}@{}", self.host),
            None => self.host.clone(),
        }
    }

    fn identity_args(&self, port_flag: &str) -> Vec<String> {
        let mut args = vec!["-i".to_string(), self.key_file.display().to_string()];
        if self.port != DEFAULT_SSH_PORT {
            args.push(port_flag.to_string());
            args.push(self.port.to_string());
        }
        args
    }

    /// `scp -i <key> [-P port] -r <local> <dest>:<path>`
    ///
    /// A directory other than `.` is sent as `<dir>/.` so its contents land
    /// in `<path>` on every deploy, not in a nested `<path>/<dir>` once
    /// `<path>` exists.
    #[must_use]
    pub fn scp_upload(&self, local: &Path) -> Invocation {
        let source = if local == Path::new(".") {
            local.to_path_buf()
        } else {
            local.join(".")
        };
        let mut args = self.identity_args("-P");
        args.push("-r".to_string());
        args.push(source.display().to_string());
        args.push(format!(
            "{}:{}",
            self.destination(),
            shell::quote_remote_path(&self.path)
        ));
        Invocation::new("scp", args)
    }

    /// `ssh -i <key> [-p port] <dest> <command>`
    #[must_use]
    pub fn ssh(&self, command: &str) -> Invocation {
        let mut args = self.identity_args("-p");
        args.push(self.destination());
        args.push(command.to_string());
        Invocation::new("ssh", args)
    }
}
