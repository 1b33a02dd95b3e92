//! Go front end for protogen.
//!
//! Parses the `.go` files of one directory with tree-sitter, groups them
//! into packages and collects their top-level declarations.
//!
//! # Module Organization
//!
//! - [`FileFilter`] - Which directory entries take part in parsing
//! - [`SourceParser`] - Directory to packages, file by file
//! - [`Package`], [`SourceFile`], [`Declaration`] - Parsed declaration scopes
//! - [`Collector`] - Sorted, de-duplicated declaration names of one kind

mod collect;
mod decl;
mod error;
mod filter;
mod package;
mod parser;

pub use collect::{Collected, Collector, PlainStruct, SkipReason, Skipped, StructuralPredicate};
pub use decl::{Declaration, DeclarationKind, TypeShape, is_exported};
pub use error::{Error, Result};
pub use filter::{FileFilter, GO_EXTENSION, TEST_SUFFIX, is_generated_source};
pub use package::{Package, SourceFile};
pub use parser::SourceParser;
