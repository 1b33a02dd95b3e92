//! Core utilities and types for protogen.
//!
//! This crate provides the pieces shared by the Go front end, the emitter
//! and the command line: change-detecting file writes, diagnostics and
//! the optional `protogen.toml` configuration file.

mod config;
mod diagnostic;
mod error;
mod file;

pub use config::{CONFIG_FILE_NAME, ConfigFile, DEFAULT_GOFILE};
pub use diagnostic::{Diagnostic, Severity};
pub use error::{Error, Result};
// File operations
pub use file::{GeneratedFile, SharedStream, WriteGate, WriteMode, WriteResult};
