use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure raised by a tool transform.
///
/// Variants that carry a `context` already render with their prefix
/// (`"Invalid JSON: ..."`), so the engine passes their display string through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Malformed input for the selected tool and mode.
    #[error("{context}: {message}")]
    Validation { context: String, message: String },

    /// Recognised input shape that the tool does not handle.
    #[error("{0}")]
    UnsupportedFormat(String),

    /// Every QR decode strategy was exhausted.
    #[error("{0}")]
    Decode(String),

    /// The tool ran but could not produce a result.
    #[error("{context}: {message}")]
    Failed { context: String, message: String },

    #[error("{0}")]
    Message(String),
}

impl ToolError {
    pub fn validation(context: impl Into<String>, message: impl ToString) -> Self {
        Self::Validation {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub fn failed(context: impl Into<String>, message: impl ToString) -> Self {
        Self::Failed {
            context: context.into(),
            message: message.to_string(),
        }
    }

    pub fn unsupported(message: impl Into<String>) -> Self {
        Self::UnsupportedFormat(message.into())
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Diagnostic classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::Validation { .. } => ErrorKind::Validation,
            ToolError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            ToolError::Decode(_) => ErrorKind::Decode,
            ToolError::Failed { .. } | ToolError::Message(_) => ErrorKind::Other,
        }
    }
}

/// Coarse error taxonomy surfaced alongside user-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    Validation,
    Decode,
    UnsupportedFormat,
    Other,
}

pub type Result<T> = std::result::Result<T, ToolError>;
