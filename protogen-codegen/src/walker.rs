//! Depth-first traversal of a source tree.
//!
//! Every directory is handled on its own: parse, collect, render, commit,
//! then queue its subdirectories. Nothing is shared between directories
//! except the [`WalkConfig`] fixed at construction.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use protogen_core::{
    DEFAULT_GOFILE, Diagnostic, GeneratedFile, WriteGate, WriteMode, WriteResult,
};
use protogen_go::{Collector, FileFilter, Package, Skipped, SourceParser};
use tracing::{debug, info};

use crate::{Error, ProtoGeneratorFile, Result};

/// Settings for one run.
#[derive(Debug, Clone)]
pub struct WalkConfig {
    /// Name of the generated file in each package directory.
    pub gofile: String,
    /// Write, check or stream the rendered files.
    pub mode: WriteMode,
    /// Descend into subdirectories.
    pub recurse: bool,
    /// Abort on the first failing directory instead of recording it.
    pub fail_fast: bool,
    /// Directory names never descended into.
    pub exclude: Vec<String>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            gofile: DEFAULT_GOFILE.to_string(),
            mode: WriteMode::Files,
            recurse: true,
            fail_fast: false,
            exclude: Vec::new(),
        }
    }
}

/// Cooperative stop signal, checked between directories.
#[derive(Debug, Clone, Default)]
pub struct Cancellation(Arc<AtomicBool>);

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// What happened to one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    pub dir: PathBuf,
    pub package: String,
    /// Path of the generated file.
    pub target: PathBuf,
    /// Emitted type names, sorted.
    pub struct_types: Vec<String>,
    pub result: WriteResult,
}

/// An exported type left out of a package's listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDeclaration {
    pub package: String,
    pub skipped: Skipped,
}

/// A directory whose generation failed while the walk went on.
#[derive(Debug)]
pub struct DirectoryError {
    pub dir: PathBuf,
    pub error: Error,
}

/// Result of walking one or more roots.
#[derive(Debug, Default)]
pub struct WalkReport {
    pub packages: Vec<PackageOutcome>,
    pub skipped: Vec<SkippedDeclaration>,
    pub errors: Vec<DirectoryError>,
    /// Number of directories visited.
    pub directories: usize,
    /// The walk stopped early because of a [`Cancellation`].
    pub cancelled: bool,
}

impl WalkReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Packages whose target file was (or in check mode, would be) rewritten.
    pub fn changed(&self) -> impl Iterator<Item = &PackageOutcome> {
        self.packages.iter().filter(|p| p.result.is_change())
    }

    /// Skipped declarations as warnings, directory failures as errors and
    /// an early stop as info.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let warnings = self.skipped.iter().map(|s| {
            Diagnostic::warning(format!(
                "skipped {}.{}: {}",
                s.package, s.skipped.name, s.skipped.reason
            ))
            .at(s.skipped.location())
        });
        let errors = self
            .errors
            .iter()
            .map(|e| Diagnostic::error(e.error.to_string()).at(e.dir.display().to_string()));
        let cancelled = self
            .cancelled
            .then(|| Diagnostic::info("walk cancelled before every directory was visited"));
        warnings.chain(errors).chain(cancelled).collect()
    }

    /// Append the results of another walk.
    pub fn merge(&mut self, other: WalkReport) {
        self.packages.extend(other.packages);
        self.skipped.extend(other.skipped);
        self.errors.extend(other.errors);
        self.directories += other.directories;
        self.cancelled |= other.cancelled;
    }
}

/// Generates a proto generator file for every package under a root.
pub struct TreeWalker {
    config: WalkConfig,
    filter: FileFilter,
    gate: WriteGate,
    collector: Collector,
    cancel: Cancellation,
}

impl TreeWalker {
    pub fn new(config: WalkConfig) -> Self {
        let filter =
            FileFilter::new(config.gofile.clone()).with_excluded_dirs(config.exclude.clone());
        let gate = WriteGate::new(config.mode.clone());
        Self {
            config,
            filter,
            gate,
            collector: Collector::plain_structs(),
            cancel: Cancellation::new(),
        }
    }

    /// Stop between directories once `cancel` fires.
    pub fn with_cancellation(mut self, cancel: Cancellation) -> Self {
        self.cancel = cancel;
        self
    }

    /// Walk each root in order.
    ///
    /// A root that is not a directory aborts the run, as does any failure
    /// when `fail_fast` is set.
    pub fn walk_all<P: AsRef<Path>>(&self, roots: &[P]) -> Result<WalkReport> {
        let mut report = WalkReport::default();
        for root in roots {
            if self.cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            report.merge(self.walk(root.as_ref())?);
        }
        Ok(report)
    }

    /// Walk a single root, generating every package found.
    pub fn walk(&self, root: &Path) -> Result<WalkReport> {
        self.traverse(root, |parser, dir, report| {
            self.generate_dir(parser, dir, report)
        })
    }

    /// Walk a single root without generating anything, handing every parsed
    /// package to `on_package`.
    pub fn scan<F>(&self, root: &Path, mut on_package: F) -> Result<WalkReport>
    where
        F: FnMut(Package),
    {
        self.traverse(root, |parser, dir, _| {
            for (_, package) in parser.parse_dir(dir, &self.filter)? {
                on_package(package);
            }
            Ok(())
        })
    }

    /// Depth-first over `root`, calling `visit` once per directory.
    fn traverse<F>(&self, root: &Path, mut visit: F) -> Result<WalkReport>
    where
        F: FnMut(&mut SourceParser, &Path, &mut WalkReport) -> Result<()>,
    {
        let metadata = fs::metadata(root).map_err(|source| protogen_go::Error::Read {
            path: root.to_path_buf(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(protogen_go::Error::NotADirectory {
                path: root.to_path_buf(),
            }
            .into());
        }

        let mut parser = SourceParser::new()?;
        let mut report = WalkReport::default();
        let mut stack = vec![root.to_path_buf()];

        while let Some(dir) = stack.pop() {
            if self.cancel.is_cancelled() {
                info!(dir = %dir.display(), "walk cancelled");
                report.cancelled = true;
                break;
            }
            report.directories += 1;
            debug!(dir = %dir.display(), "visiting");

            if let Err(error) = visit(&mut parser, &dir, &mut report) {
                self.record(&dir, error, &mut report)?;
            }

            if self.config.recurse {
                match self.subdirectories(&dir) {
                    // Reversed so the smallest name is popped first
                    Ok(children) => stack.extend(children.into_iter().rev()),
                    Err(error) => self.record(&dir, error, &mut report)?,
                }
            }
        }

        Ok(report)
    }

    fn record(&self, dir: &Path, error: Error, report: &mut WalkReport) -> Result<()> {
        if self.config.fail_fast || error.is_fatal() {
            return Err(error);
        }
        info!(dir = %dir.display(), %error, "directory failed");
        report.errors.push(DirectoryError {
            dir: dir.to_path_buf(),
            error,
        });
        Ok(())
    }

    /// Parse, collect, render and commit every package of one directory.
    fn generate_dir(
        &self,
        parser: &mut SourceParser,
        dir: &Path,
        report: &mut WalkReport,
    ) -> Result<()> {
        let packages = parser.parse_dir(dir, &self.filter)?;
        let multiple = packages.len() > 1;

        for (name, package) in &packages {
            debug!(
                package = %name,
                files = package.file_count(),
                declarations = package.declarations().count(),
                "collecting"
            );
            let collected = self.collector.collect(package);
            for skipped in collected.skipped {
                debug!(
                    package = %name,
                    name = %skipped.name,
                    reason = %skipped.reason,
                    "skipped type"
                );
                report.skipped.push(SkippedDeclaration {
                    package: name.clone(),
                    skipped,
                });
            }

            let file_name = if multiple {
                self.filter.package_target(name)
            } else {
                self.config.gofile.clone()
            };
            let file = ProtoGeneratorFile::new(file_name, name, collected.names);
            let result = file.write(dir, &self.gate)?;
            debug!(package = %name, ?result, "committed");

            report.packages.push(PackageOutcome {
                dir: dir.to_path_buf(),
                package: name.clone(),
                target: file.path(dir),
                struct_types: file.struct_types().to_vec(),
                result,
            });
        }

        Ok(())
    }

    /// Immediate child directories, sorted by name. Symlinks are not
    /// followed.
    fn subdirectories(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let to_error = |source| protogen_go::Error::Read {
            path: dir.to_path_buf(),
            source,
        };

        let mut children = Vec::new();
        for entry in fs::read_dir(dir).map_err(to_error)? {
            let entry = entry.map_err(to_error)?;
            if !entry.file_type().map_err(to_error)?.is_dir() {
                continue;
            }
            let name = entry.file_name();
            if self.filter.descend(&name.to_string_lossy()) {
                children.push(entry.path());
            }
        }
        children.sort();
        Ok(children)
    }
}
