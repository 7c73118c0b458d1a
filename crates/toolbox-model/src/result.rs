//! Result types returned by the transform engine.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ToolError};
use crate::mode::OutputKind;

/// Successful transform output, tagged with where it renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformOutput {
    pub content: String,
    pub kind: OutputKind,
}

impl TransformOutput {
    pub fn new(content: impl Into<String>, kind: OutputKind) -> Self {
        Self {
            content: content.into(),
            kind,
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self::new(content, OutputKind::StructuredText)
    }

    pub fn html(content: impl Into<String>) -> Self {
        Self::new(content, OutputKind::CustomHtml)
    }
}

/// Failed transform, reduced to a single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformError {
    pub message: String,
    pub kind: ErrorKind,
}

impl TransformError {
    pub fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }
}

impl From<ToolError> for TransformError {
    fn from(error: ToolError) -> Self {
        Self {
            kind: error.kind(),
            message: error.to_string(),
        }
    }
}

impl std::fmt::Display for TransformError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransformError {}

/// Either a complete output or a message. Never partially filled.
pub type TransformResult = std::result::Result<TransformOutput, TransformError>;
