//! Domain layer: pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod compose;
pub mod config;
pub mod error;
pub mod health;
pub mod monitor;
pub mod plan;
pub mod remote;
pub mod shell;
pub mod status;

pub use compose::{ComposeCommand, ComposeVariant};
pub use config::{DeployConfig, apply_setting, validate_config_key};
pub use error::{ConfigError, DeployError, RemoteError};
pub use health::{DoctorChecks, KeyFileState, collect_issues};
pub use plan::{Invocation, Plan, Step};
pub use remote::RemoteTarget;
