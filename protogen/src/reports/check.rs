//! Check command report data structures.

use std::path::PathBuf;

use protogen_core::Diagnostic;

use super::output::{Output, Report};

/// Report data from checking generated files.
#[derive(Debug)]
pub struct CheckReport {
    /// Generated files that are missing or differ from a fresh render.
    pub stale: Vec<PathBuf>,
    /// Number of packages checked.
    pub checked: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl CheckReport {
    /// No stale files and no failed directories.
    pub fn is_clean(&self) -> bool {
        self.stale.is_empty() && !self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for diag in &self.diagnostics {
            out.diagnostic(diag);
        }

        if self.stale.is_empty() {
            out.preformatted(&format!(
                "✓ {} generated file{} up to date",
                self.checked,
                if self.checked == 1 { " is" } else { "s are" }
            ));
            return;
        }

        out.section(&format!("Out of date ({})", self.stale.len()));
        for path in &self.stale {
            out.list_item(&path.display().to_string());
        }
        out.newline();
        out.preformatted("Run `protogen generate` to update them.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::Recorder;

    #[test]
    fn test_render_clean() {
        let report = CheckReport {
            stale: Vec::new(),
            checked: 1,
            diagnostics: Vec::new(),
        };

        let mut out = Recorder::default();
        report.render(&mut out);

        assert_eq!(out.text(), "✓ 1 generated file is up to date");
        assert!(report.is_clean());
    }

    #[test]
    fn test_render_stale() {
        let report = CheckReport {
            stale: vec![PathBuf::from("models/proto_generator.go")],
            checked: 4,
            diagnostics: Vec::new(),
        };

        let mut out = Recorder::default();
        report.render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "Out of date (1):",
                "  - models/proto_generator.go",
                "",
                "Run `protogen generate` to update them.",
            ]
        );
        assert!(!report.is_clean());
    }

    #[test]
    fn test_errors_are_not_clean() {
        let report = CheckReport {
            stale: Vec::new(),
            checked: 0,
            diagnostics: vec![Diagnostic::error("syntax error")],
        };
        assert!(!report.is_clean());
    }
}
