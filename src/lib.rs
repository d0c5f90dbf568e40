//! fm-actions: manage CloudBees feature flags from the command line
//!
//! A thin REST client for the CloudBees Platform feature management API plus
//! one handler per command. Names given on the command line are resolved to
//! API identifiers, configuration updates are merged from a YAML document and
//! per-field overrides, and results are written as named output files for CI
//! pipelines.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod output;
pub mod resolve;

pub use error::{EntityKind, FmError};
