//! Application services: use-case orchestration.
//!
//! Each service module implements a single use-case by composing domain logic
//! with port trait calls. Services import only from `crate::domain` and
//! `crate::application::ports`, never from `crate::infra`, `crate::commands`,
//! or `crate::output`.

pub mod compose_detect;
pub mod config_service;
pub mod deploy;
pub mod doctor;
pub mod monitor;
pub mod plan_runner;
pub mod stack_status;
