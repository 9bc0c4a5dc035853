//! depscan - dependency vulnerability scanning for Android and Flutter projects
//!
//! This crate extracts the dependencies declared by a Gradle build file or a
//! `pubspec.yaml` manifest, queries the OSV vulnerability database for each
//! one concurrently, and aggregates the outcomes into a single pass/fail
//! report suitable for CI gates.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

pub use config::Config;
pub use logging::init_tracing;
