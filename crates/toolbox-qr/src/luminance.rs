//! Pixel buffers and the luminance source built from them.

/// A raw RGBA pixel buffer, four bytes per pixel, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl PixelBuffer {
    /// Filled with a single color.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let mut bytes = Vec::with_capacity(count * 4);
        for _ in 0..count {
            bytes.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            rgba: bytes,
        }
    }

    /// Wrap `bytes` as a `width` x `height` RGBA image.
    ///
    /// The buffer is truncated or zero-padded to exactly `width * height * 4`
    /// bytes, so a short buffer reads as black transparent pixels.
    pub fn from_raw_lossy(width: u32, height: u32, mut bytes: Vec<u8>) -> Self {
        let expected = width as usize * height as usize * 4;
        bytes.resize(expected, 0);
        Self {
            width,
            height,
            rgba: bytes,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.rgba
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.rgba
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Paint a solid rectangle. Out-of-range parts are clipped.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, rgba: [u8; 4]) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                let offset = (py as usize * self.width as usize + px as usize) * 4;
                self.rgba[offset..offset + 4].copy_from_slice(&rgba);
            }
        }
    }
}

/// Grayscale view of an image, one byte per pixel.
///
/// Luminance is `(r + 2g + b) / 4`; alpha is ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LuminanceSource {
    width: usize,
    height: usize,
    luminances: Vec<u8>,
}

impl LuminanceSource {
    pub fn from_pixels(pixels: &PixelBuffer) -> Self {
        let luminances = pixels
            .as_bytes()
            .chunks_exact(4)
            .map(|px| {
                let r = u32::from(px[0]);
                let g = u32::from(px[1]);
                let b = u32::from(px[2]);
                ((r + 2 * g + b) / 4) as u8
            })
            .collect();
        Self {
            width: pixels.width() as usize,
            height: pixels.height() as usize,
            luminances,
        }
    }

    /// Photographic negative of this source.
    pub fn inverted(&self) -> Self {
        Self {
            width: self.width,
            height: self.height,
            luminances: self.luminances.iter().map(|&l| 255 - l).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.luminances[y * self.width + x]
    }

    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.width;
        &self.luminances[start..start + self.width]
    }

    pub fn matrix(&self) -> &[u8] {
        &self.luminances
    }
}
