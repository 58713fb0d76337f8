//! Unit tests for deployctl CLI
//!
//! These tests use mocked dependencies and run fast without external I/O.

mod compose_detect;
mod deploy_service;
mod doctor_service;
mod helpers;
mod plan_runner;
