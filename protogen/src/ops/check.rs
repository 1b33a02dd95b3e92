//! Check operation - find generated files that are missing or stale.

use std::path::PathBuf;

use protogen_codegen::{Result, TreeWalker, WalkConfig};
use protogen_core::WriteMode;

use crate::reports::CheckReport;

/// Execute the check operation. Nothing is written regardless of the mode
/// in `config`.
pub fn check(roots: &[PathBuf], config: WalkConfig) -> Result<CheckReport> {
    let config = WalkConfig {
        mode: WriteMode::Check,
        ..config
    };
    let walk = TreeWalker::new(config).walk_all(roots)?;

    let stale = walk.changed().map(|p| p.target.clone()).collect();
    Ok(CheckReport {
        stale,
        checked: walk.packages.len(),
        diagnostics: walk.diagnostics(),
    })
}
