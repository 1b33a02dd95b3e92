use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::Declaration;

/// One parsed `.go` file.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    package: String,
    scope: IndexMap<String, Declaration>,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, package: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            package: package.into(),
            scope: IndexMap::new(),
        }
    }

    /// Add a declaration to the file scope. A name that is already declared
    /// keeps its first declaration.
    pub fn declare(&mut self, decl: Declaration) {
        self.scope.entry(decl.name.clone()).or_insert(decl);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name from the file's package clause.
    pub fn package(&self) -> &str {
        &self.package
    }

    /// Declarations in source order.
    pub fn scope(&self) -> &IndexMap<String, Declaration> {
        &self.scope
    }
}

/// The files of one directory that share a package clause.
#[derive(Debug, Clone)]
pub struct Package {
    name: String,
    dir: PathBuf,
    files: IndexMap<PathBuf, SourceFile>,
}

impl Package {
    pub fn new(name: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            files: IndexMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory the package was parsed from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn add_file(&mut self, file: SourceFile) {
        self.files.insert(file.path.clone(), file);
    }

    /// Files in parse order.
    pub fn files(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.values()
    }

    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Every declaration of every file, in file then source order.
    pub fn declarations(&self) -> impl Iterator<Item = &Declaration> {
        self.files().flat_map(|f| f.scope.values())
    }
}
