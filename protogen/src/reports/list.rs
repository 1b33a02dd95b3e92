//! List command report data structures.

use std::path::PathBuf;

use protogen_core::Diagnostic;
use protogen_go::DeclarationKind;
use serde::Serialize;

use super::output::{Output, Report};

/// Declarations of one kind across a tree.
#[derive(Debug, Serialize)]
pub struct ListReport {
    pub kind: DeclarationKind,
    pub packages: Vec<PackageListing>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Names found in one package, sorted.
#[derive(Debug, Serialize)]
pub struct PackageListing {
    pub package: String,
    pub dir: PathBuf,
    pub names: Vec<String>,
}

impl ListReport {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_error())
    }
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        for diag in &self.diagnostics {
            out.diagnostic(diag);
        }

        for listing in &self.packages {
            out.section(&format!("{} ({})", listing.package, listing.dir.display()));
            if listing.names.is_empty() {
                out.preformatted(&format!("  (no {} declarations)", self.kind));
            }
            for name in &listing.names {
                out.list_item(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::testing::Recorder;

    fn report() -> ListReport {
        ListReport {
            kind: DeclarationKind::Function,
            packages: vec![
                PackageListing {
                    package: "models".to_string(),
                    dir: PathBuf::from("models"),
                    names: vec!["Load".to_string(), "Save".to_string()],
                },
                PackageListing {
                    package: "util".to_string(),
                    dir: PathBuf::from("util"),
                    names: Vec::new(),
                },
            ],
            diagnostics: Vec::new(),
        }
    }

    #[test]
    fn test_render_text() {
        let mut out = Recorder::default();
        report().render(&mut out);

        assert_eq!(
            out.lines,
            vec![
                "models (models):",
                "  - Load",
                "  - Save",
                "util (util):",
                "  (no func declarations)",
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(report()).unwrap();
        assert_eq!(json["kind"], "function");
        assert_eq!(json["packages"][0]["names"][1], "Save");
        assert_eq!(json["packages"][1]["dir"], "util");
    }
}
