//! The QR code tool: text to a PNG image and back.
//!
//! Both directions run off the calling task (see [`toolbox_qr::generate`]
//! and [`toolbox_qr::read`]); the result is an HTML fragment.

use html_escape::encode_text;
use toolbox_model::{Mode, QrOptions, Result, ToolError};
use toolbox_qr::QrError;

const ENCODE_CONTEXT: &str = "Failed to generate QR code";
const DECODE_CONTEXT: &str = "Failed to read QR code";

/// Encode: `<img>` with a PNG data URL. Decode: the text read from an image
/// data URL.
pub async fn qrcode(input: String, mode: Mode) -> Result<String> {
    qrcode_with(input, mode, QrOptions::default()).await
}

/// [`qrcode`] with explicit generation options.
pub async fn qrcode_with(input: String, mode: Mode, options: QrOptions) -> Result<String> {
    match mode {
        Mode::Encode => {
            if input.trim().is_empty() {
                return Err(ToolError::failed(ENCODE_CONTEXT, QrError::EmptyInput));
            }
            let data_url = toolbox_qr::generate(input, options)
                .await
                .map_err(|e| ToolError::failed(ENCODE_CONTEXT, e))?;
            Ok(format!("<img src=\"{data_url}\" alt=\"QR Code\">"))
        }
        Mode::Decode => {
            if !input.trim_start().starts_with("data:image/") {
                return Err(ToolError::validation(
                    DECODE_CONTEXT,
                    "Please provide a valid image data URL",
                ));
            }
            let decoded = toolbox_qr::read(input).await.map_err(|e| match e {
                QrError::Decode(failure) => {
                    tracing::debug!(attempts = ?failure.strategy_names(), "QR decode exhausted");
                    ToolError::Decode(format!("{DECODE_CONTEXT}: {failure}"))
                }
                other => ToolError::failed(DECODE_CONTEXT, other),
            })?;
            Ok(format!(
                "<pre class=\"qr-text\">{}</pre>",
                encode_text(&decoded.text)
            ))
        }
    }
}
