//! Error type shared by the library and the `gsdf` binary.
//!
//! Every variant maps to a process exit code so `main` can stay tiny.

use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Mismatched lengths, unknown method names, too few samples.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A numeric routine failed (no bracket, no convergence, singular system).
    #[error("numeric failure: {0}")]
    NumericDegenerate(String),

    /// Data that is not a recognized image or level representation.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl AppError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::NumericDegenerate(message.into())
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat(message.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::InvalidInput(_) => 2,
            AppError::UnsupportedFormat(_) => 3,
            AppError::NumericDegenerate(_) => 4,
            AppError::Io { .. } => 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct() {
        let errs = [
            AppError::invalid("a"),
            AppError::unsupported("b"),
            AppError::degenerate("c"),
            AppError::io("d", std::io::Error::other("e")),
        ];
        let mut codes: Vec<u8> = errs.iter().map(|e| e.exit_code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errs.len());
    }

    #[test]
    fn io_error_message_includes_context() {
        let err = AppError::io("Failed to open LUT 'x.json'", std::io::Error::other("denied"));
        assert_eq!(err.to_string(), "Failed to open LUT 'x.json': denied");
    }
}
