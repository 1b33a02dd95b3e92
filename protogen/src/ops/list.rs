//! List operation - declarations of every package in a tree.

use std::path::PathBuf;

use protogen_codegen::{Result, TreeWalker, WalkConfig, WalkReport};
use protogen_go::{Collector, DeclarationKind, PlainStruct};
use tracing::debug;

use crate::reports::{ListReport, PackageListing};

/// Options for the list operation.
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    pub kind: DeclarationKind,
    /// Include unexported names.
    pub unexported: bool,
    /// Only plain struct types; forces `kind` to type.
    pub structs_only: bool,
}

/// Execute the list operation over every root.
pub fn list(roots: &[PathBuf], config: WalkConfig, opts: ListOptions) -> Result<ListReport> {
    let collector = if opts.structs_only {
        Collector::new(DeclarationKind::Type).with_predicate(PlainStruct)
    } else {
        Collector::new(opts.kind)
    }
    .exported_only(!opts.unexported);

    debug!(kind = %opts.kind, structs_only = opts.structs_only, "list");
    let walker = TreeWalker::new(config);
    let mut packages = Vec::new();
    let mut walk = WalkReport::default();

    for root in roots {
        let scanned = walker.scan(root, |package| {
            let collected = collector.collect(&package);
            packages.push(PackageListing {
                package: package.name().to_string(),
                dir: package.dir().to_path_buf(),
                names: collected.names,
            });
        })?;
        walk.merge(scanned);
    }

    let kind = if opts.structs_only {
        DeclarationKind::Type
    } else {
        opts.kind
    };
    Ok(ListReport {
        kind,
        packages,
        diagnostics: walk.diagnostics(),
    })
}
