//! Error types for the resolver tooling.
//!
//! The facilities themselves never fail. These errors only come out of
//! parsing signals, loading profiles, and rendering reports.

use std::fmt;

/// Error type for resolver and tooling operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormaliseError {
    /// Build mode override was neither `debug` nor `release`
    InvalidBuildMode(String),
    /// Compiler version string could not be parsed
    InvalidRustcVersion(String),
    /// I/O error occurred
    Io(String),
    /// Profile file could not be parsed
    Config(String),
    /// Report could not be serialized
    Serialize(String),
    /// Facilities left without a definition after resolution
    IncompleteTable(Vec<String>),
}

impl fmt::Display for NormaliseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormaliseError::InvalidBuildMode(value) => {
                write!(f, "Invalid build mode '{}' (expected debug or release)", value)
            }
            NormaliseError::InvalidRustcVersion(value) => {
                write!(f, "Invalid rustc version: {}", value)
            }
            NormaliseError::Io(msg) => write!(f, "I/O error: {}", msg),
            NormaliseError::Config(msg) => write!(f, "Config error: {}", msg),
            NormaliseError::Serialize(msg) => write!(f, "Serialize error: {}", msg),
            NormaliseError::IncompleteTable(missing) => {
                write!(f, "Facilities left undefined: {}", missing.join(", "))
            }
        }
    }
}

impl std::error::Error for NormaliseError {}

impl From<std::io::Error> for NormaliseError {
    fn from(err: std::io::Error) -> Self {
        NormaliseError::Io(err.to_string())
    }
}

/// Result type alias for resolver operations.
pub type NormaliseResult<T> = Result<T, NormaliseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = NormaliseError::InvalidBuildMode("fast".into());
        assert_eq!(
            err.to_string(),
            "Invalid build mode 'fast' (expected debug or release)"
        );

        let err = NormaliseError::IncompleteTable(vec!["breakpoint".into(), "errorif".into()]);
        assert_eq!(err.to_string(), "Facilities left undefined: breakpoint, errorif");
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: NormaliseError = io.into();
        assert!(matches!(err, NormaliseError::Io(ref msg) if msg == "missing"));
    }
}
