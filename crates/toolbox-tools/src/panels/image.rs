//! Base64 image inspection for the image panel.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::ImageReader;
use toolbox_model::{Result, ToolError};

use super::{PanelSection, PanelView, require_input};

/// Build a data URL from the bytes of an acquired image file.
pub fn load_file(bytes: &[u8], mime: &str) -> Result<String> {
    if !mime.starts_with("image/") {
        return Err(ToolError::validation(
            "Failed to read image file",
            format!("'{mime}' is not an image type"),
        ));
    }
    if bytes.is_empty() {
        return Err(ToolError::message("Failed to read image file: file is empty"));
    }
    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

/// Width and height read from the image header, for any format the
/// decoder recognizes.
pub fn dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    match reader.into_dimensions() {
        Ok(dimensions) => Some(dimensions),
        Err(error) => {
            tracing::debug!(%error, "image dimensions unavailable");
            None
        }
    }
}

fn human_size(bytes: usize) -> String {
    const UNITS: [&str; 3] = ["KB", "MB", "GB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut size = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if size < 1024.0 {
            break;
        }
        size /= 1024.0;
        unit = next;
    }
    format!("{size:.1} {unit} ({bytes} bytes)")
}

/// Describe a `data:image/...;base64,...` URL.
pub fn view(input: &str) -> Result<PanelView> {
    let data_url = require_input(input, "Please paste a base64 image data URL")?;
    let invalid = || ToolError::unsupported("Invalid base64 image format");
    let rest = data_url.strip_prefix("data:").ok_or_else(invalid)?;
    let (mime, payload) = rest.split_once(";base64,").ok_or_else(invalid)?;
    if !mime.starts_with("image/") {
        return Err(invalid());
    }

    let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = STANDARD
        .decode(payload.as_bytes())
        .map_err(|e| ToolError::validation("Invalid image data", e))?;

    let mut details = PanelSection::new("Image")
        .with_entry("Type", mime)
        .with_entry("Size", human_size(bytes.len()));
    if let Some((width, height)) = dimensions(&bytes) {
        details = details.with_entry("Dimensions", format!("{width} x {height}"));
    }

    Ok(PanelView::new()
        .with_section(details)
        .with_preview(format!("data:{mime};base64,{payload}")))
}
