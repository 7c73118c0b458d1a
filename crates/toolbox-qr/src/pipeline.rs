//! Multi-strategy QR decoding.
//!
//! A decode walks [`STRATEGIES`] in order. Each attempt builds its own
//! luminance source, binarizes it and hands the bitmap to the grid
//! detector; the first attempt that yields text wins. When every attempt
//! fails the caller gets a [`DecodeFailure`] listing what was tried.

use std::fmt;

use thiserror::Error;
use tracing::{debug, trace};

use crate::binarizer::{BinarizerKind, BitMatrix};
use crate::luminance::{LuminanceSource, PixelBuffer};

/// User-facing message for an exhausted pipeline.
pub const DECODE_FAILURE_MESSAGE: &str = "Could not detect a valid QR code.";

/// Detector hints applied to every attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeHints {
    /// Try every detected grid instead of only the first one.
    pub try_harder: bool,
    /// The image holds nothing but the symbol; when detection finds no
    /// grid, crop to the dark bounding box and add a fresh quiet zone.
    pub pure_barcode: bool,
    /// Retry with the bitmap rotated by 90 degrees.
    pub try_rotate: bool,
}

impl Default for DecodeHints {
    fn default() -> Self {
        Self {
            try_harder: true,
            pure_barcode: true,
            try_rotate: true,
        }
    }
}

/// One strategy of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeAttempt {
    pub strategy_name: &'static str,
    pub binarizer: BinarizerKind,
    pub inverted: bool,
}

impl fmt::Display for DecodeAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.strategy_name)
    }
}

/// Fixed strategy order.
pub const STRATEGIES: [DecodeAttempt; 3] = [
    DecodeAttempt {
        strategy_name: "hybrid",
        binarizer: BinarizerKind::Hybrid,
        inverted: false,
    },
    DecodeAttempt {
        strategy_name: "hybrid-inverted",
        binarizer: BinarizerKind::Hybrid,
        inverted: true,
    },
    DecodeAttempt {
        strategy_name: "global-histogram",
        binarizer: BinarizerKind::GlobalHistogram,
        inverted: false,
    },
];

/// Why a single attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptResult {
    pub attempt: DecodeAttempt,
    pub reason: String,
}

/// Every strategy failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Could not detect a valid QR code.")]
pub struct DecodeFailure {
    pub attempts: Vec<AttemptResult>,
}

impl DecodeFailure {
    /// Strategy names in the order they were tried.
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.attempts
            .iter()
            .map(|result| result.attempt.strategy_name)
            .collect()
    }
}

/// A successful decode and the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    pub strategy: DecodeAttempt,
}

/// Run the full pipeline.
pub fn decode(pixels: &PixelBuffer) -> Result<Decoded, DecodeFailure> {
    decode_with(pixels, &STRATEGIES, DecodeHints::default())
}

/// Run `strategies` in order with `hints`.
pub fn decode_with(
    pixels: &PixelBuffer,
    strategies: &[DecodeAttempt],
    hints: DecodeHints,
) -> Result<Decoded, DecodeFailure> {
    let mut attempts = Vec::with_capacity(strategies.len());
    for &attempt in strategies {
        match run_attempt(pixels, attempt, hints) {
            Ok(text) => {
                debug!(
                    strategy = attempt.strategy_name,
                    failed_before = attempts.len(),
                    "QR decoded"
                );
                return Ok(Decoded {
                    text,
                    strategy: attempt,
                });
            }
            Err(reason) => {
                debug!(strategy = attempt.strategy_name, %reason, "QR strategy failed");
                attempts.push(AttemptResult { attempt, reason });
            }
        }
    }
    Err(DecodeFailure { attempts })
}

fn run_attempt(
    pixels: &PixelBuffer,
    attempt: DecodeAttempt,
    hints: DecodeHints,
) -> Result<String, String> {
    let source = LuminanceSource::from_pixels(pixels);
    let source = if attempt.inverted {
        source.inverted()
    } else {
        source
    };
    let matrix = attempt
        .binarizer
        .binarize(&source)
        .map_err(|e| e.to_string())?;

    let mut reason = match detect(&matrix, hints) {
        Ok(text) => return Ok(text),
        Err(reason) => reason,
    };

    if hints.pure_barcode
        && let Some(cropped) = crop_to_symbol(&matrix)
    {
        trace!(strategy = attempt.strategy_name, "retrying on cropped symbol");
        match detect(&cropped, hints) {
            Ok(text) => return Ok(text),
            Err(next) => reason = next,
        }
    }

    if hints.try_rotate {
        trace!(strategy = attempt.strategy_name, "retrying rotated");
        match detect(&rotate(&matrix), hints) {
            Ok(text) => return Ok(text),
            Err(next) => reason = next,
        }
    }

    Err(reason)
}

fn detect(matrix: &BitMatrix, hints: DecodeHints) -> Result<String, String> {
    let mut prepared =
        rqrr::PreparedImage::prepare_from_bitmap(matrix.width(), matrix.height(), |x, y| {
            matrix.get(x, y)
        });
    let grids = prepared.detect_grids();
    if grids.is_empty() {
        return Err("no finder patterns found".to_string());
    }

    let limit = if hints.try_harder { grids.len() } else { 1 };
    let mut reason = String::new();
    for grid in grids.iter().take(limit) {
        match grid.decode() {
            Ok((_meta, text)) => return Ok(text),
            Err(error) => reason = format!("{error:?}"),
        }
    }
    Err(reason)
}

/// `R(x, y) = M(y, H - 1 - x)`, output is `H` wide and `W` tall.
fn rotate(matrix: &BitMatrix) -> BitMatrix {
    let width = matrix.width();
    let height = matrix.height();
    let mut rotated = BitMatrix::new(height, width);
    for y in 0..width {
        for x in 0..height {
            if matrix.get(y, height - 1 - x) {
                rotated.set(x, y);
            }
        }
    }
    rotated
}

/// Crop to the bounding box of dark pixels and surround it with a light
/// border of one eighth of the larger side.
fn crop_to_symbol(matrix: &BitMatrix) -> Option<BitMatrix> {
    let mut left = usize::MAX;
    let mut top = usize::MAX;
    let mut right = 0;
    let mut bottom = 0;
    for y in 0..matrix.height() {
        for x in 0..matrix.width() {
            if matrix.get(x, y) {
                left = left.min(x);
                top = top.min(y);
                right = right.max(x);
                bottom = bottom.max(y);
            }
        }
    }
    if left == usize::MAX {
        return None;
    }

    let width = right - left + 1;
    let height = bottom - top + 1;
    let border = width.max(height) / 8 + 1;
    let mut cropped = BitMatrix::new(width + 2 * border, height + 2 * border);
    for y in 0..height {
        for x in 0..width {
            if matrix.get(left + x, top + y) {
                cropped.set(border + x, border + y);
            }
        }
    }
    Some(cropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategies_are_in_fixed_order() {
        let names: Vec<_> = STRATEGIES.iter().map(|s| s.strategy_name).collect();
        assert_eq!(names, ["hybrid", "hybrid-inverted", "global-histogram"]);
        assert!(STRATEGIES[1].inverted);
        assert_eq!(STRATEGIES[2].binarizer, BinarizerKind::GlobalHistogram);
    }

    #[test]
    fn all_zero_buffer_exhausts_every_strategy() {
        let pixels = PixelBuffer::from_raw_lossy(64, 64, Vec::new());
        let failure = decode(&pixels).expect_err("nothing to decode");
        assert_eq!(failure.attempts.len(), 3);
        assert_eq!(
            failure.strategy_names(),
            ["hybrid", "hybrid-inverted", "global-histogram"]
        );
        assert_eq!(failure.to_string(), DECODE_FAILURE_MESSAGE);
    }

    #[test]
    fn empty_image_reports_reason_per_attempt() {
        let pixels = PixelBuffer::from_raw_lossy(0, 0, Vec::new());
        let failure = decode(&pixels).expect_err("empty");
        assert!(
            failure
                .attempts
                .iter()
                .all(|result| result.reason == "image is empty")
        );
    }

    #[test]
    fn rotation_maps_corners() {
        let mut matrix = BitMatrix::new(3, 2);
        matrix.set(0, 1);
        let rotated = rotate(&matrix);
        assert_eq!((rotated.width(), rotated.height()), (2, 3));
        // M(0, 1) lands where y = 0 and H - 1 - x = 1.
        assert!(rotated.get(0, 0));
        assert_eq!(rotated.count_set(), 1);
    }

    #[test]
    fn crop_adds_quiet_zone() {
        let mut matrix = BitMatrix::new(20, 20);
        matrix.set(5, 5);
        matrix.set(12, 9);
        let cropped = crop_to_symbol(&matrix).expect("dark pixels present");
        // 8x5 box, border 8 / 8 + 1 = 2.
        assert_eq!((cropped.width(), cropped.height()), (12, 9));
        assert!(cropped.get(2, 2));
        assert!(cropped.get(9, 6));
        assert!(crop_to_symbol(&BitMatrix::new(4, 4)).is_none());
    }
}
