//! Error types for QR operations.

use thiserror::Error;

use crate::pipeline::DecodeFailure;

/// Errors that can occur when generating or reading QR codes.
#[derive(Debug, Error)]
pub enum QrError {
    /// Nothing to encode.
    #[error("Please enter text to generate QR code")]
    EmptyInput,

    /// The payload does not fit in any QR version or is otherwise rejected.
    #[error("cannot encode payload: {message}")]
    Encode { message: String },

    /// The input is not a base64 image data URL.
    #[error("invalid image data URL: {message}")]
    InvalidDataUrl { message: String },

    /// PNG serialization failed.
    #[error("failed to write PNG: {message}")]
    Png { message: String },

    /// All decode strategies failed.
    #[error(transparent)]
    Decode(#[from] DecodeFailure),

    /// The blocking worker did not complete.
    #[error("QR worker failed: {message}")]
    Task { message: String },
}

impl From<qrcode::types::QrError> for QrError {
    fn from(error: qrcode::types::QrError) -> Self {
        Self::Encode {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, QrError>;
