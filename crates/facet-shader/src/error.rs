use std::fmt;
use std::io;
use std::path::PathBuf;

/// Failure to read a combined `.shader` source file.
///
/// Not locally recoverable: callers are expected to abort startup.
#[derive(Debug)]
pub struct SourceError {
    /// Path of the file that could not be read.
    pub path: PathBuf,
    /// Underlying I/O error.
    pub source: io::Error,
}

impl SourceError {
    pub(crate) fn new(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self { path: path.into(), source }
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot read shader source {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}
