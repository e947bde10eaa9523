//! Error types for the firecal workspace.

use thiserror::Error;

/// Errors that can occur during an export run.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Unsupported date value: {0}")]
    UnsupportedType(String),

    #[error("Retrieval error: {0}")]
    Retrieval(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExportError {
    /// Process exit code for this error: bad invocations exit 2,
    /// everything else is a generic failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) | Self::UnknownTimezone(_) => 2,
            _ => 1,
        }
    }
}

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_errors_exit_with_code_2() {
        assert_eq!(
            ExportError::InvalidArgument("bad flags".to_string()).exit_code(),
            2
        );
        assert_eq!(
            ExportError::UnknownTimezone("Mars/Olympus".to_string()).exit_code(),
            2
        );
    }

    #[test]
    fn runtime_errors_exit_with_code_1() {
        assert_eq!(
            ExportError::Retrieval("connection refused".to_string()).exit_code(),
            1
        );
        assert_eq!(
            ExportError::UnsupportedType("mapValue".to_string()).exit_code(),
            1
        );
    }
}
