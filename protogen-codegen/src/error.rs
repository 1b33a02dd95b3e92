use miette::Diagnostic;
use thiserror::Error;

/// Result type for generation runs
pub type Result<T> = std::result::Result<T, Error>;

/// Failure while generating one directory.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// Reading or parsing Go sources failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Source(#[from] protogen_go::Error),

    /// Writing or streaming the generated file failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Output(#[from] protogen_core::Error),
}

impl From<Box<protogen_go::Error>> for Error {
    fn from(error: Box<protogen_go::Error>) -> Self {
        Error::Source(*error)
    }
}

impl Error {
    /// Whether this error must abort the whole run regardless of fail-fast.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::Source(protogen_go::Error::NotADirectory { .. } | protogen_go::Error::Language(_))
        )
    }
}
