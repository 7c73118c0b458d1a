//! QR code generation and decoding.
//!
//! Generation is deterministic: the same text and [`QrOptions`] always give
//! the same pixels and PNG bytes. Decoding runs an ordered list of
//! binarization strategies (see [`pipeline`]) over pixels sampled from an
//! image data URL (see [`data_url`]).
//!
//! [`generate`] and [`read`] are the async entry points used by the
//! transform engine; both push the CPU work onto tokio's blocking pool.

pub mod binarizer;
pub mod data_url;
pub mod encode;
pub mod error;
pub mod luminance;
pub mod pipeline;

pub use binarizer::{BinarizeError, BinarizerKind, BitMatrix};
pub use encode::{QrImage, encode};
pub use error::{QrError, Result};
pub use luminance::{LuminanceSource, PixelBuffer};
pub use pipeline::{
    AttemptResult, DECODE_FAILURE_MESSAGE, DecodeAttempt, DecodeFailure, DecodeHints, Decoded,
    STRATEGIES, decode, decode_with,
};

use toolbox_model::QrOptions;

/// Generate a QR code for `text` and return it as a PNG data URL.
pub async fn generate(text: String, options: QrOptions) -> Result<String> {
    tokio::task::spawn_blocking(move || generate_sync(&text, &options))
        .await
        .map_err(|e| QrError::Task {
            message: format!("Task panicked: {e}"),
        })?
}

/// Synchronous [`generate`].
pub fn generate_sync(text: &str, options: &QrOptions) -> Result<String> {
    let image = encode(text, options)?;
    tracing::debug!(
        modules = image.modules(),
        width = image.width(),
        "QR generated"
    );
    image.to_data_url()
}

/// Decode the QR code in an image data URL.
pub async fn read(data_url: String) -> Result<Decoded> {
    tokio::task::spawn_blocking(move || read_sync(&data_url))
        .await
        .map_err(|e| QrError::Task {
            message: format!("Task panicked: {e}"),
        })?
}

/// Synchronous [`read`].
pub fn read_sync(data_url: &str) -> Result<Decoded> {
    let pixels = data_url::sample(data_url)?;
    tracing::debug!(
        width = pixels.width(),
        height = pixels.height(),
        "sampled data URL"
    );
    Ok(decode(&pixels)?)
}
