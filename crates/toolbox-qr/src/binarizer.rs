//! Luminance-to-bitmap conversion.
//!
//! Two strategies are available:
//!
//! - **Global histogram**: a single black point for the whole image, picked
//!   from the valley between the two tallest peaks of a coarse histogram.
//!   Cheap and good for evenly lit images.
//! - **Hybrid**: local thresholds computed per 8x8 block from a 5x5
//!   neighbourhood of block black points. Handles gradients and shadows;
//!   falls back to the global histogram for images under 40 pixels.

use std::fmt;

use thiserror::Error;

use crate::luminance::LuminanceSource;

const LUMINANCE_BITS: u32 = 5;
const LUMINANCE_SHIFT: u32 = 8 - LUMINANCE_BITS;
const LUMINANCE_BUCKETS: usize = 1 << LUMINANCE_BITS;

const BLOCK_SIZE_POWER: usize = 3;
const BLOCK_SIZE: usize = 1 << BLOCK_SIZE_POWER;
const BLOCK_SIZE_MASK: usize = BLOCK_SIZE - 1;
const MINIMUM_DIMENSION: usize = BLOCK_SIZE * 5;
const MIN_DYNAMIC_RANGE: u32 = 24;

/// Binarization algorithm used by a decode strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinarizerKind {
    Hybrid,
    GlobalHistogram,
}

impl BinarizerKind {
    pub fn binarize(self, source: &LuminanceSource) -> Result<BitMatrix, BinarizeError> {
        if source.width() == 0 || source.height() == 0 {
            return Err(BinarizeError::EmptyImage);
        }
        match self {
            BinarizerKind::Hybrid => hybrid(source),
            BinarizerKind::GlobalHistogram => global_histogram(source),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinarizerKind::Hybrid => "hybrid",
            BinarizerKind::GlobalHistogram => "global-histogram",
        }
    }
}

impl fmt::Display for BinarizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BinarizeError {
    #[error("image is empty")]
    EmptyImage,
    /// No two distinct luminance peaks; nothing to separate.
    #[error("image is too uniform to binarize")]
    TooUniform,
}

/// Packed 2D bitmap; a set bit is a dark module pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct BitMatrix {
    width: usize,
    height: usize,
    row_words: usize,
    bits: Vec<u32>,
}

impl BitMatrix {
    pub fn new(width: usize, height: usize) -> Self {
        let row_words = width.div_ceil(32);
        Self {
            width,
            height,
            row_words,
            bits: vec![0; row_words * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        let word = self.bits[y * self.row_words + x / 32];
        (word >> (x % 32)) & 1 == 1
    }

    pub fn set(&mut self, x: usize, y: usize) {
        self.bits[y * self.row_words + x / 32] |= 1 << (x % 32);
    }

    pub fn count_set(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }
}

impl fmt::Debug for BitMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitMatrix")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("set", &self.count_set())
            .finish()
    }
}

fn global_histogram(source: &LuminanceSource) -> Result<BitMatrix, BinarizeError> {
    let width = source.width();
    let height = source.height();

    // Sample four interior rows, skipping the outer fifth on each side.
    let mut buckets = [0u32; LUMINANCE_BUCKETS];
    for y in 1..5 {
        let row = source.row(height * y / 5);
        let right = (width * 4) / 5;
        for &pixel in &row[width / 5..right] {
            buckets[(pixel >> LUMINANCE_SHIFT) as usize] += 1;
        }
    }
    let black_point = estimate_black_point(&buckets)?;

    let mut matrix = BitMatrix::new(width, height);
    for y in 0..height {
        for (x, &pixel) in source.row(y).iter().enumerate() {
            if u32::from(pixel) < black_point {
                matrix.set(x, y);
            }
        }
    }
    Ok(matrix)
}

fn estimate_black_point(buckets: &[u32; LUMINANCE_BUCKETS]) -> Result<u32, BinarizeError> {
    let mut max_bucket_count = 0;
    let mut first_peak = 0usize;
    let mut first_peak_size = 0;
    for (x, &count) in buckets.iter().enumerate() {
        if count > first_peak_size {
            first_peak = x;
            first_peak_size = count;
        }
        if count > max_bucket_count {
            max_bucket_count = count;
        }
    }

    // Second peak: tall and far from the first.
    let mut second_peak = 0usize;
    let mut second_peak_score = 0u64;
    for (x, &count) in buckets.iter().enumerate() {
        let distance = x.abs_diff(first_peak) as u64;
        let score = u64::from(count) * distance * distance;
        if score > second_peak_score {
            second_peak = x;
            second_peak_score = score;
        }
    }

    let (first_peak, second_peak) = if first_peak > second_peak {
        (second_peak, first_peak)
    } else {
        (first_peak, second_peak)
    };

    if second_peak - first_peak <= LUMINANCE_BUCKETS / 16 {
        return Err(BinarizeError::TooUniform);
    }

    // Deepest valley between the peaks, biased toward the dark peak.
    let mut best_valley = second_peak - 1;
    let mut best_valley_score: i64 = -1;
    for x in (first_peak + 1..second_peak).rev() {
        let from_first = (x - first_peak) as i64;
        let score = from_first
            * from_first
            * (second_peak - x) as i64
            * i64::from(max_bucket_count - buckets[x]);
        if score > best_valley_score {
            best_valley = x;
            best_valley_score = score;
        }
    }

    Ok((best_valley as u32) << LUMINANCE_SHIFT)
}

fn hybrid(source: &LuminanceSource) -> Result<BitMatrix, BinarizeError> {
    let width = source.width();
    let height = source.height();
    if width < MINIMUM_DIMENSION || height < MINIMUM_DIMENSION {
        return global_histogram(source);
    }

    let mut sub_width = width >> BLOCK_SIZE_POWER;
    if width & BLOCK_SIZE_MASK != 0 {
        sub_width += 1;
    }
    let mut sub_height = height >> BLOCK_SIZE_POWER;
    if height & BLOCK_SIZE_MASK != 0 {
        sub_height += 1;
    }

    let black_points = block_black_points(source, sub_width, sub_height);
    Ok(threshold_blocks(source, sub_width, sub_height, &black_points))
}

/// Per-block black point: the block mean, or half the block minimum for
/// low-contrast blocks (nudged toward already computed neighbours).
fn block_black_points(
    source: &LuminanceSource,
    sub_width: usize,
    sub_height: usize,
) -> Vec<Vec<u32>> {
    let width = source.width();
    let luminances = source.matrix();
    let max_y_offset = source.height() - BLOCK_SIZE;
    let max_x_offset = width - BLOCK_SIZE;
    let mut black_points = vec![vec![0u32; sub_width]; sub_height];

    for y in 0..sub_height {
        let y_offset = (y << BLOCK_SIZE_POWER).min(max_y_offset);
        for x in 0..sub_width {
            let x_offset = (x << BLOCK_SIZE_POWER).min(max_x_offset);
            let mut sum = 0u32;
            let mut min = u32::from(u8::MAX);
            let mut max = 0u32;
            for yy in 0..BLOCK_SIZE {
                let offset = (y_offset + yy) * width + x_offset;
                for &pixel in &luminances[offset..offset + BLOCK_SIZE] {
                    let pixel = u32::from(pixel);
                    sum += pixel;
                    min = min.min(pixel);
                    max = max.max(pixel);
                }
            }

            let mut average = sum >> (BLOCK_SIZE_POWER * 2);
            if max - min <= MIN_DYNAMIC_RANGE {
                average = min / 2;
                if y > 0 && x > 0 {
                    let neighbours = (black_points[y - 1][x]
                        + 2 * black_points[y][x - 1]
                        + black_points[y - 1][x - 1])
                        / 4;
                    if min < neighbours {
                        average = neighbours;
                    }
                }
            }
            black_points[y][x] = average;
        }
    }
    black_points
}

fn threshold_blocks(
    source: &LuminanceSource,
    sub_width: usize,
    sub_height: usize,
    black_points: &[Vec<u32>],
) -> BitMatrix {
    let width = source.width();
    let height = source.height();
    let luminances = source.matrix();
    let max_y_offset = height - BLOCK_SIZE;
    let max_x_offset = width - BLOCK_SIZE;
    let mut matrix = BitMatrix::new(width, height);

    for y in 0..sub_height {
        let y_offset = (y << BLOCK_SIZE_POWER).min(max_y_offset);
        let top = clamp_center(y, sub_height - 3);
        for x in 0..sub_width {
            let x_offset = (x << BLOCK_SIZE_POWER).min(max_x_offset);
            let left = clamp_center(x, sub_width - 3);
            let mut sum = 0u32;
            for row in &black_points[top - 2..=top + 2] {
                sum += row[left - 2..=left + 2].iter().sum::<u32>();
            }
            let threshold = sum / 25;
            for yy in 0..BLOCK_SIZE {
                let offset = (y_offset + yy) * width + x_offset;
                for xx in 0..BLOCK_SIZE {
                    if u32::from(luminances[offset + xx]) <= threshold {
                        matrix.set(x_offset + xx, y_offset + yy);
                    }
                }
            }
        }
    }
    matrix
}

fn clamp_center(value: usize, max: usize) -> usize {
    if value < 2 { 2 } else { value.min(max) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::luminance::PixelBuffer;

    fn half_black(width: u32, height: u32) -> LuminanceSource {
        let mut pixels = PixelBuffer::filled(width, height, [255, 255, 255, 255]);
        pixels.fill_rect(0, 0, width / 2, height, [0, 0, 0, 255]);
        LuminanceSource::from_pixels(&pixels)
    }

    #[test]
    fn global_histogram_separates_two_tones() {
        let source = half_black(50, 50);
        let matrix = BinarizerKind::GlobalHistogram
            .binarize(&source)
            .expect("binarize");
        assert!(matrix.get(0, 0));
        assert!(matrix.get(24, 49));
        assert!(!matrix.get(25, 0));
        assert_eq!(matrix.count_set(), 25 * 50);
    }

    #[test]
    fn hybrid_matches_global_on_clean_input() {
        let source = half_black(64, 64);
        let hybrid = BinarizerKind::Hybrid.binarize(&source).expect("binarize");
        assert!(hybrid.get(3, 3));
        assert!(!hybrid.get(60, 3));
    }

    #[test]
    fn uniform_image_is_rejected_by_histogram() {
        let pixels = PixelBuffer::filled(20, 20, [0, 0, 0, 255]);
        let source = LuminanceSource::from_pixels(&pixels);
        assert_eq!(
            BinarizerKind::GlobalHistogram.binarize(&source),
            Err(BinarizeError::TooUniform)
        );
        // Hybrid falls back to the histogram below the minimum dimension.
        assert_eq!(
            BinarizerKind::Hybrid.binarize(&source),
            Err(BinarizeError::TooUniform)
        );
    }

    #[test]
    fn empty_image_is_rejected() {
        let pixels = PixelBuffer::filled(0, 0, [0, 0, 0, 0]);
        let source = LuminanceSource::from_pixels(&pixels);
        assert_eq!(
            BinarizerKind::Hybrid.binarize(&source),
            Err(BinarizeError::EmptyImage)
        );
        assert_eq!(BinarizeError::EmptyImage.to_string(), "image is empty");
        assert_eq!(
            BinarizeError::TooUniform.to_string(),
            "image is too uniform to binarize"
        );
    }
}
