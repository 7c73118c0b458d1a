//! Deterministic QR generation.

use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use qrcode::{Color, QrCode};
use toolbox_model::{EcLevel, QrOptions};

use crate::data_url::MAX_DIMENSION;
use crate::error::{QrError, Result};
use crate::luminance::PixelBuffer;

const DARK: [u8; 4] = [0, 0, 0, 255];
const LIGHT: [u8; 4] = [255, 255, 255, 255];

/// A rendered QR symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrImage {
    modules: usize,
    scale: u32,
    pixels: PixelBuffer,
}

impl QrImage {
    /// Modules per side, excluding the quiet zone.
    pub fn modules(&self) -> usize {
        self.modules
    }

    /// Pixels per module.
    pub fn scale(&self) -> u32 {
        self.scale
    }

    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let image = RgbaImage::from_raw(
            self.pixels.width(),
            self.pixels.height(),
            self.pixels.as_bytes().to_vec(),
        )
        .ok_or_else(|| QrError::Png {
            message: "pixel buffer does not match dimensions".to_string(),
        })?;
        let mut cursor = Cursor::new(Vec::new());
        image
            .write_to(&mut cursor, ImageFormat::Png)
            .map_err(|e| QrError::Png {
                message: e.to_string(),
            })?;
        Ok(cursor.into_inner())
    }

    pub fn to_data_url(&self) -> Result<String> {
        let png = self.to_png_bytes()?;
        Ok(format!("data:image/png;base64,{}", STANDARD.encode(png)))
    }
}

fn ec_level(level: EcLevel) -> qrcode::EcLevel {
    match level {
        EcLevel::L => qrcode::EcLevel::L,
        EcLevel::M => qrcode::EcLevel::M,
        EcLevel::Q => qrcode::EcLevel::Q,
        EcLevel::H => qrcode::EcLevel::H,
    }
}

/// Encode `text` into a black-on-white symbol.
///
/// The module scale is the largest integer that keeps the image within the
/// requested size; when no size is requested, or the symbol does not fit,
/// `options.scale` is used.
pub fn encode(text: &str, options: &QrOptions) -> Result<QrImage> {
    if text.trim().is_empty() {
        return Err(QrError::EmptyInput);
    }
    let code = QrCode::with_error_correction_level(
        text.as_bytes(),
        ec_level(options.error_correction_level),
    )?;
    let modules = code.width();
    let colors = code.to_colors();

    let too_large = || QrError::Encode {
        message: format!("image would exceed {MAX_DIMENSION} pixels per side"),
    };
    let margin = options.margin;
    let total = u32::try_from(modules)
        .ok()
        .and_then(|modules| margin.checked_mul(2)?.checked_add(modules))
        .ok_or_else(too_large)?;
    let scale = match options.target_size() {
        Some(target) if target >= total => target / total,
        _ => options.scale.max(1),
    };
    let side = total
        .checked_mul(scale)
        .filter(|side| *side <= MAX_DIMENSION)
        .ok_or_else(too_large)?;

    let mut pixels = PixelBuffer::filled(side, side, LIGHT);
    for (index, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let x = (margin + (index % modules) as u32) * scale;
        let y = (margin + (index / modules) as u32) * scale;
        pixels.fill_rect(x, y, scale, scale, DARK);
    }

    Ok(QrImage {
        modules,
        scale,
        pixels,
    })
}
