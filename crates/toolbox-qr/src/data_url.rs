//! Reading pixel data out of image data URLs.
//!
//! This is not an image decoder. Compressed formats are sampled as if they
//! were raw RGBA: the base64 payload is decoded, dimensions are taken from a
//! PNG IHDR header when one is present (or guessed as a square otherwise),
//! and the bytes are grouped four at a time.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::error::{QrError, Result};
use crate::luminance::PixelBuffer;

/// Largest width or height accepted from a header.
pub const MAX_DIMENSION: u32 = 4096;

const PNG_SIGNATURE: [u8; 2] = [0x89, 0x50];

/// Remove a `data:image/<type>;base64,` prefix if present.
pub fn strip_prefix(data_url: &str) -> &str {
    let trimmed = data_url.trim();
    let Some(rest) = trimmed.strip_prefix("data:image/") else {
        return trimmed;
    };
    match rest.split_once(";base64,") {
        Some((kind, payload)) if !kind.is_empty() && kind.chars().all(is_word) => payload,
        _ => trimmed,
    }
}

fn is_word(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Decode the base64 payload of a data URL (or of bare base64).
pub fn decode_payload(data_url: &str) -> Result<Vec<u8>> {
    let payload: String = strip_prefix(data_url)
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let payload = payload.trim_end_matches('=');
    let padded = pad(payload);
    STANDARD
        .decode(padded.as_bytes())
        .map_err(|e| QrError::InvalidDataUrl {
            message: e.to_string(),
        })
}

fn pad(payload: &str) -> String {
    let mut padded = payload.to_string();
    while padded.len() % 4 != 0 {
        padded.push('=');
    }
    padded
}

/// Dimensions the sampler will use for `bytes`.
pub fn dimensions(bytes: &[u8]) -> (u32, u32) {
    let (width, height) = if bytes.len() >= 24 && bytes[..2] == PNG_SIGNATURE {
        (read_u32_be(bytes, 16), read_u32_be(bytes, 20))
    } else if bytes.len() >= 2 && bytes[..2] == PNG_SIGNATURE {
        // Truncated header.
        (0, 0)
    } else {
        let side = ((bytes.len() / 4) as f64).sqrt().floor() as u32;
        (side, side)
    };
    (width.min(MAX_DIMENSION), height.min(MAX_DIMENSION))
}

fn read_u32_be(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

/// Sample a data URL into a pixel buffer.
pub fn sample(data_url: &str) -> Result<PixelBuffer> {
    let bytes = decode_payload(data_url)?;
    let (width, height) = dimensions(&bytes);
    Ok(PixelBuffer::from_raw_lossy(width, height, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_stripped_for_any_image_type() {
        assert_eq!(strip_prefix("data:image/png;base64,AAAA"), "AAAA");
        assert_eq!(strip_prefix("data:image/jpeg;base64,AAAA"), "AAAA");
        assert_eq!(strip_prefix("  AAAA\n"), "AAAA");
        assert_eq!(
            strip_prefix("data:image/svg+xml;base64,AAAA"),
            "data:image/svg+xml;base64,AAAA"
        );
    }

    #[test]
    fn png_header_dimensions_are_big_endian() {
        let mut bytes = vec![0u8; 32];
        bytes[0] = 0x89;
        bytes[1] = 0x50;
        bytes[16..20].copy_from_slice(&300u32.to_be_bytes());
        bytes[20..24].copy_from_slice(&200u32.to_be_bytes());
        assert_eq!(dimensions(&bytes), (300, 200));

        bytes[16..20].copy_from_slice(&100_000u32.to_be_bytes());
        assert_eq!(dimensions(&bytes), (MAX_DIMENSION, 200));
    }

    #[test]
    fn headerless_bytes_are_treated_as_square() {
        assert_eq!(dimensions(&[0u8; 64]), (4, 4));
        assert_eq!(dimensions(&[0u8; 70]), (4, 4));
        assert_eq!(dimensions(&[]), (0, 0));
    }

    #[test]
    fn padding_is_optional() {
        assert_eq!(decode_payload("data:image/png;base64,AQI").unwrap(), [1, 2]);
        assert_eq!(decode_payload("AQI=").unwrap(), [1, 2]);
        assert!(matches!(
            decode_payload("not base64!"),
            Err(QrError::InvalidDataUrl { .. })
        ));
    }
}
