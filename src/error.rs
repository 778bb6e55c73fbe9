//! Error types.
//!
//! - `SelectError`: failures of the selection engine itself. Only malformed
//!   input is an error; unmatched ids and filtered candidates are not.
//! - `AppError`: what the binary reports, carrying the process exit code.

use thiserror::Error;

/// Configuration-class failures of a selection run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Curve '{id}' has {points} points but {thresholds} thresholds.")]
    MalformedCurve {
        id: String,
        points: usize,
        thresholds: usize,
    },
}

#[derive(Clone, Error)]
#[error("{message}")]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl From<SelectError> for AppError {
    fn from(err: SelectError) -> Self {
        AppError::new(2, err.to_string())
    }
}
