//! Configuration options for the generator tools.
//!
//! Every struct deserialises from the JSON the user types into the editor, so
//! all fields default when omitted.

use serde::{Deserialize, Serialize};

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EcLevel {
    /// Recovers about 7% of data.
    L,
    /// Recovers about 15% of data.
    #[default]
    M,
    /// Recovers about 25% of data.
    Q,
    /// Recovers about 30% of data.
    H,
}

impl std::str::FromStr for EcLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(EcLevel::L),
            "M" => Ok(EcLevel::M),
            "Q" => Ok(EcLevel::Q),
            "H" => Ok(EcLevel::H),
            other => Err(format!("unknown error correction level '{other}'")),
        }
    }
}

/// Options for QR generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QrOptions {
    pub error_correction_level: EcLevel,
    /// Quiet zone around the symbol, in modules.
    pub margin: u32,
    /// Pixels per module when no target width is given.
    pub scale: u32,
    /// Target image width in pixels. Overrides `scale` when it fits.
    pub width: Option<u32>,
    /// Target image height in pixels. The symbol is square, so the larger of
    /// width and height wins.
    pub height: Option<u32>,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            error_correction_level: EcLevel::M,
            margin: 4,
            scale: 8,
            width: Some(300),
            height: Some(300),
        }
    }
}

impl QrOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_correction(mut self, level: EcLevel) -> Self {
        self.error_correction_level = level;
        self
    }

    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_size(mut self, width: Option<u32>, height: Option<u32>) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Requested edge length in pixels, if any.
    pub fn target_size(&self) -> Option<u32> {
        match (self.width, self.height) {
            (Some(w), Some(h)) => Some(w.max(h)),
            (Some(v), None) | (None, Some(v)) => Some(v),
            (None, None) => None,
        }
    }
}

/// Options for the random string generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomStringOptions {
    pub length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub numbers: bool,
    pub special: bool,
}

impl Default for RandomStringOptions {
    fn default() -> Self {
        Self {
            length: 32,
            lowercase: true,
            uppercase: false,
            numbers: false,
            special: false,
        }
    }
}

/// Options for the lorem ipsum generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoremOptions {
    pub paragraphs: usize,
}

impl Default for LoremOptions {
    fn default() -> Self {
        Self { paragraphs: 1 }
    }
}

/// Options for the UUID generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UuidOptions {
    pub count: usize,
}

impl Default for UuidOptions {
    fn default() -> Self {
        Self { count: 1 }
    }
}
