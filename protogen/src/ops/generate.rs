//! Generate operation - write one generator file per package.

use std::path::PathBuf;

use protogen_codegen::{Result, TreeWalker, WalkConfig};
use protogen_core::WriteMode;
use tracing::debug;

use crate::reports::{GenerateReport, PackageLine};

/// Execute the generate operation over every root.
pub fn generate(roots: &[PathBuf], config: WalkConfig) -> Result<GenerateReport> {
    let streamed = matches!(config.mode, WriteMode::Stream(_));
    debug!(roots = roots.len(), gofile = %config.gofile, streamed, "generate");
    let walk = TreeWalker::new(config).walk_all(roots)?;

    let packages = walk
        .packages
        .iter()
        .map(|outcome| PackageLine {
            package: outcome.package.clone(),
            target: outcome.target.clone(),
            types: outcome.struct_types.len(),
            result: outcome.result,
        })
        .collect();

    Ok(GenerateReport {
        packages,
        diagnostics: walk.diagnostics(),
        directories: walk.directories,
        streamed,
    })
}
