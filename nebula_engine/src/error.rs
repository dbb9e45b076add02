//! Error types for the Nebula engine
//!
//! Every fallible operation of the resource layer returns [`Result`]. The
//! variants follow the failure taxonomy of the cache: I/O and format failures
//! are recoverable per resource, GPU failures are decided per call site,
//! cross-reference failures fall back to defaults where one exists.

use std::fmt;
use std::path::PathBuf;

use crate::resource::ResourceHash;

/// Result type for Nebula engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Nebula engine errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Missing or unreadable file
    Io(String),

    /// Truncated buffer, oversized blob length or unknown discriminator
    Format(String),

    /// Backend-specific error (GPU object creation, device lost, ...)
    BackendError(String),

    /// The external shader compiler rejected a source file
    ShaderCompilation {
        /// Source file handed to the compiler
        path: PathBuf,
        /// Diagnostic log, one entry per line
        log: Vec<String>,
    },

    /// A cross-reference hash resolves to nothing and has no default
    MissingReference(ResourceHash),

    /// Invalid resource or contract violation (type mismatch, built-in edit, ...)
    InvalidResource(String),

    /// Initialization failed (built-in bootstrap, default shader not set, ...)
    InitializationFailed(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(msg) => write!(f, "I/O error: {}", msg),
            Error::Format(msg) => write!(f, "Format error: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::ShaderCompilation { path, log } => write!(
                f,
                "Shader compilation failed for '{}' ({} diagnostic line(s))",
                path.display(),
                log.len()
            ),
            Error::MissingReference(hash) => write!(f, "Missing reference: {}", hash),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::InitializationFailed(msg) => write!(f, "Initialization failed: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
