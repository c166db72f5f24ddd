// Centralized error handling module
// Provides context-rich error types for validation, I/O and worker faults

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for the digest engine.
/// Validation variants are raised before any input is opened; I/O variants
/// abort the affected input only; `WorkerFailure` indicates an internal
/// fault and is always fatal.
#[derive(Debug)]
pub enum DigestError {
    /// File system errors with context
    FileNotFound { path: PathBuf },
    PermissionDenied { path: PathBuf, operation: String },
    IoError { path: Option<PathBuf>, operation: String, source: io::Error },

    /// Job validation errors
    NoAlgorithms,
    UnsupportedAlgorithm { algorithm: String },
    DuplicateAlgorithm { algorithm: String },
    InvalidArguments { message: String },

    /// A digest worker terminated without producing its digest
    WorkerFailure { algorithm: String, detail: String },
}

impl fmt::Display for DigestError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            // File system errors
            DigestError::FileNotFound { path } => {
                write!(f, "File not found: {}\n", path.display())?;
                write!(f, "Suggestion: Check that the file path is correct and the file exists")
            }
            DigestError::PermissionDenied { path, operation } => {
                write!(f, "Permission denied while {} file: {}\n", operation, path.display())?;
                write!(f, "Suggestion: Check file permissions or run with appropriate privileges")
            }
            DigestError::IoError { path, operation, source } => {
                if let Some(p) = path {
                    write!(f, "I/O error while {} file {}: {}\n", operation, p.display(), source)?;
                } else {
                    write!(f, "I/O error while {}: {}\n", operation, source)?;
                }
                write!(f, "Suggestion: Check file permissions and disk space")
            }

            // Validation errors
            DigestError::NoAlgorithms => {
                write!(f, "No hash algorithms requested\n")?;
                write!(f, "Suggestion: Enable at least one algorithm, use --list to see available algorithms")
            }
            DigestError::UnsupportedAlgorithm { algorithm } => {
                write!(f, "Unsupported hash algorithm: {}\n", algorithm)?;
                write!(f, "Suggestion: Use --list to see available algorithms")
            }
            DigestError::DuplicateAlgorithm { algorithm } => {
                write!(f, "Hash algorithm requested more than once: {}\n", algorithm)?;
                write!(f, "Suggestion: Request each algorithm at most once")
            }
            DigestError::InvalidArguments { message } => {
                write!(f, "Invalid arguments: {}\n", message)?;
                write!(f, "Suggestion: Run with --help to see usage information")
            }

            // Internal faults
            DigestError::WorkerFailure { algorithm, detail } => {
                write!(f, "Digest worker for {} failed: {}\n", algorithm, detail)?;
                write!(f, "Suggestion: This is a bug in hashmux, please report it")
            }
        }
    }
}

impl std::error::Error for DigestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DigestError::IoError { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl DigestError {
    /// Create an I/O variant with context about the operation and optional path
    pub fn from_io_error(err: io::Error, operation: &str, path: Option<PathBuf>) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => {
                if let Some(p) = path {
                    DigestError::FileNotFound { path: p }
                } else {
                    DigestError::IoError {
                        path: None,
                        operation: operation.to_string(),
                        source: err,
                    }
                }
            }
            io::ErrorKind::PermissionDenied => {
                if let Some(p) = path {
                    DigestError::PermissionDenied {
                        path: p,
                        operation: operation.to_string(),
                    }
                } else {
                    DigestError::IoError {
                        path: None,
                        operation: operation.to_string(),
                        source: err,
                    }
                }
            }
            _ => DigestError::IoError {
                path,
                operation: operation.to_string(),
                source: err,
            },
        }
    }

    /// True for errors raised before any input is opened.
    /// The CLI maps these to exit code 2.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DigestError::NoAlgorithms
                | DigestError::UnsupportedAlgorithm { .. }
                | DigestError::DuplicateAlgorithm { .. }
                | DigestError::InvalidArguments { .. }
        )
    }
}

// Default From implementation for io::Error (without context)
impl From<io::Error> for DigestError {
    fn from(err: io::Error) -> Self {
        DigestError::from_io_error(err, "unknown operation", None)
    }
}
