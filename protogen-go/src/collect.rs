//! Collection of exported declaration names from a package.

use std::{collections::BTreeMap, fmt, path::PathBuf};

use serde::Serialize;

use crate::{Declaration, DeclarationKind, Package, TypeShape};

/// A structural test a declaration must pass to be collected.
pub trait StructuralPredicate: Send + Sync {
    /// `Ok` keeps the declaration, `Err` reports why it was left out.
    fn check(&self, decl: &Declaration) -> Result<(), SkipReason>;
}

/// Accepts non-generic `struct` type declarations only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStruct;

impl StructuralPredicate for PlainStruct {
    fn check(&self, decl: &Declaration) -> Result<(), SkipReason> {
        match decl.shape {
            Some(TypeShape::Struct) if decl.generic => Err(SkipReason::Generic),
            Some(TypeShape::Struct) => Ok(()),
            Some(shape) => Err(SkipReason::NotAStruct(shape)),
            None => Err(SkipReason::NotAType(decl.kind)),
        }
    }
}

/// Why a matching declaration was not collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The type's underlying shape is not a struct.
    NotAStruct(TypeShape),
    /// The struct declares type parameters.
    Generic,
    /// The declaration is not a type at all.
    NotAType(DeclarationKind),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotAStruct(shape) => write!(f, "{} is not a plain struct", shape),
            SkipReason::Generic => write!(f, "generic struct needs type arguments"),
            SkipReason::NotAType(kind) => write!(f, "{} is not a type", kind),
        }
    }
}

/// A declaration that matched kind and visibility but failed the predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Skipped {
    pub name: String,
    pub reason: SkipReason,
    pub file: PathBuf,
    pub line: usize,
}

impl Skipped {
    /// `file:line` of the declaration.
    pub fn location(&self) -> String {
        format!("{}:{}", self.file.display(), self.line)
    }
}

/// Output of [`Collector::collect`]. Both lists are sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Collected {
    pub names: Vec<String>,
    pub skipped: Vec<Skipped>,
}

/// Collects declaration names of one kind from a package.
///
/// # Example
///
/// ```ignore
/// let structs = Collector::plain_structs().collect(&package);
/// for name in &structs.names {
///     println!("{}{{}}", name);
/// }
/// ```
pub struct Collector {
    kind: DeclarationKind,
    exported_only: bool,
    predicate: Option<Box<dyn StructuralPredicate>>,
}

impl Collector {
    /// Collect exported declarations of `kind`.
    pub fn new(kind: DeclarationKind) -> Self {
        Self {
            kind,
            exported_only: true,
            predicate: None,
        }
    }

    /// Exported, non-generic struct types.
    pub fn plain_structs() -> Self {
        Self::new(DeclarationKind::Type).with_predicate(PlainStruct)
    }

    /// Include unexported names when `false`.
    pub fn exported_only(mut self, exported_only: bool) -> Self {
        self.exported_only = exported_only;
        self
    }

    pub fn with_predicate(mut self, predicate: impl StructuralPredicate + 'static) -> Self {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Walk every file scope of `package`.
    ///
    /// Names are de-duplicated with the first declaration seen (in file
    /// order) deciding the outcome, then sorted byte-wise.
    pub fn collect(&self, package: &Package) -> Collected {
        let mut outcomes: BTreeMap<&str, Option<Skipped>> = BTreeMap::new();

        for file in package.files() {
            for decl in file.scope().values() {
                if decl.kind != self.kind {
                    continue;
                }
                if self.exported_only && !decl.is_exported() {
                    continue;
                }
                if outcomes.contains_key(decl.name.as_str()) {
                    continue;
                }

                let verdict = match &self.predicate {
                    Some(predicate) => predicate.check(decl),
                    None => Ok(()),
                };
                let skipped = verdict.err().map(|reason| Skipped {
                    name: decl.name.clone(),
                    reason,
                    file: file.path().to_path_buf(),
                    line: decl.line,
                });
                outcomes.insert(&decl.name, skipped);
            }
        }

        let mut collected = Collected::default();
        for (name, outcome) in outcomes {
            match outcome {
                None => collected.names.push(name.to_string()),
                Some(skipped) => collected.skipped.push(skipped),
            }
        }
        collected
    }
}
