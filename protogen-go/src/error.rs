use std::path::{Path, PathBuf};

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for Go front end operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("path is not a directory: '{path}'")]
    #[diagnostic(code(protogen::not_a_directory))]
    NotADirectory { path: PathBuf },

    #[error("failed to read '{path}'")]
    #[diagnostic(code(protogen::read_error))]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {message}")]
    #[diagnostic(
        code(protogen::parse_error),
        help("fix the syntax error or exclude the directory")
    )]
    Parse {
        path: PathBuf,
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: SourceSpan,
    },

    #[error("'{path}' has no package clause")]
    #[diagnostic(
        code(protogen::missing_package),
        help("every Go source file must start with `package <name>`")
    )]
    MissingPackageClause { path: PathBuf },

    #[error("failed to load the Go grammar: {0}")]
    #[diagnostic(code(protogen::grammar))]
    Language(String),
}

impl Error {
    pub(crate) fn read(path: &Path, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Path of the file or directory the error refers to.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::NotADirectory { path }
            | Error::Read { path, .. }
            | Error::Parse { path, .. }
            | Error::MissingPackageClause { path } => Some(path),
            Error::Language(_) => None,
        }
    }
}
