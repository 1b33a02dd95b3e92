//! Generate command report data structures.

use std::path::PathBuf;

use protogen_core::{Diagnostic, WriteResult};

use super::output::{Output, Report};

/// Report data from one generate run.
#[derive(Debug)]
pub struct GenerateReport {
    /// One line per package, in walk order.
    pub packages: Vec<PackageLine>,

    /// Skipped declarations and failed directories.
    pub diagnostics: Vec<Diagnostic>,

    /// Number of directories visited.
    pub directories: usize,

    /// Files went to stdout rather than disk.
    pub streamed: bool,
}

/// Outcome for a single package.
#[derive(Debug, Clone)]
pub struct PackageLine {
    pub package: String,
    pub target: PathBuf,
    /// Number of struct types listed in the file.
    pub types: usize,
    pub result: WriteResult,
}

impl GenerateReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    fn count(&self, result: WriteResult) -> usize {
        self.packages.iter().filter(|p| p.result == result).count()
    }
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for diag in &self.diagnostics {
            out.diagnostic(diag);
        }

        if !self.packages.is_empty() {
            out.section(&format!("Packages ({})", self.packages.len()));
            for line in &self.packages {
                let text = format!(
                    "{} ({}, {} type{})",
                    line.target.display(),
                    line.package,
                    line.types,
                    if line.types == 1 { "" } else { "s" }
                );
                match line.result {
                    WriteResult::Written => out.added_item(&text),
                    _ => out.list_item(&text),
                }
            }
            out.newline();
        }

        let summary = if self.streamed {
            format!("{} streamed", self.count(WriteResult::Streamed))
        } else {
            format!(
                "{} written, {} unchanged",
                self.count(WriteResult::Written),
                self.count(WriteResult::Unchanged)
            )
        };
        out.key_value("Generated", &summary);
        out.key_value("Directories", &self.directories.to_string());
    }
}
