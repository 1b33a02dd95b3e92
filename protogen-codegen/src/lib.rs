//! Generation of per-package protobuf generator files.
//!
//! # Module Organization
//!
//! - [`builder`] - Indented code building (CodeBuilder, Indent)
//! - [`files`] - The generated Go file ([`ProtoGeneratorFile`])
//! - [`walker`] - Recursive directory traversal ([`TreeWalker`])

pub mod builder;
mod error;
pub mod files;
pub mod walker;

pub use builder::CodeBuilder;
pub use error::{Error, Result};
pub use files::ProtoGeneratorFile;
pub use walker::{
    Cancellation, DirectoryError, PackageOutcome, SkippedDeclaration, TreeWalker, WalkConfig,
    WalkReport,
};
