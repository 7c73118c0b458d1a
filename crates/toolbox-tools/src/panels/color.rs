//! Color conversions for the color panel.
//!
//! Conversions round to whole numbers at every step, so values match what
//! common web color pickers display.

use std::sync::LazyLock;

use regex::Regex;
use toolbox_model::{Result, ToolError};

use super::{PanelSection, PanelView, require_input};

/// Color shown when the panel opens.
pub const DEFAULT_COLOR: &str = "#1E90FF";

static RGB: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgba?\((\d+),\s*(\d+),\s*(\d+)").expect("valid rgb regex")
});

static HSL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^hsla?\((\d+),\s*(\d+)%?,\s*(\d+)%?").expect("valid hsl regex")
});

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue in degrees, saturation and lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// Half-up rounding, the way browsers and JavaScript libraries round.
fn round(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

fn channel(value: f64) -> u8 {
    round(value).clamp(0, 255) as u8
}

fn percent(value: f64) -> u8 {
    round(value).clamp(0, 100) as u8
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `RGB` or `RRGGBB` (no `#`).
    pub fn from_hex(digits: &str) -> Option<Self> {
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return None,
        };
        let value = u32::from_str_radix(&expanded, 16).ok()?;
        Some(Self::new(
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        ))
    }

    /// Lowercase `#rrggbb`.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    pub fn to_hsl(self) -> Hsl {
        let (r, g, b) = self.unit();
        let min = r.min(g).min(b);
        let max = r.max(g).max(b);
        let delta = max - min;

        let mut h = if max == min {
            0.0
        } else if r == max {
            (g - b) / delta
        } else if g == max {
            2.0 + (b - r) / delta
        } else {
            4.0 + (r - g) / delta
        };
        h = (h * 60.0).min(360.0);
        if h < 0.0 {
            h += 360.0;
        }

        let l = (min + max) / 2.0;
        let s = if max == min {
            0.0
        } else if l <= 0.5 {
            delta / (max + min)
        } else {
            delta / (2.0 - max - min)
        };

        Hsl {
            h: round(h).clamp(0, 360) as u16,
            s: percent(s * 100.0),
            l: percent(l * 100.0),
        }
    }

    /// Hue, saturation and value, in degrees and percent.
    pub fn to_hsv(self) -> (u16, u8, u8) {
        let (r, g, b) = self.unit();
        let v = r.max(g).max(b);
        let diff = v - r.min(g).min(b);
        let diffc = |c: f64| (v - c) / 6.0 / diff + 0.5;

        let (mut h, s) = if diff == 0.0 {
            (0.0, 0.0)
        } else {
            let (rdif, gdif, bdif) = (diffc(r), diffc(g), diffc(b));
            let h = if r == v {
                bdif - gdif
            } else if g == v {
                1.0 / 3.0 + rdif - bdif
            } else {
                2.0 / 3.0 + gdif - rdif
            };
            (h, diff / v)
        };
        if h < 0.0 {
            h += 1.0;
        } else if h > 1.0 {
            h -= 1.0;
        }
        (
            round(h * 360.0).clamp(0, 360) as u16,
            percent(s * 100.0),
            percent(v * 100.0),
        )
    }

    /// Cyan, magenta, yellow and key, in percent.
    pub fn to_cmyk(self) -> [u8; 4] {
        let (r, g, b) = self.unit();
        let k = (1.0 - r).min(1.0 - g).min(1.0 - b);
        let component = |c: f64| {
            if k >= 1.0 {
                0.0
            } else {
                (1.0 - c - k) / (1.0 - k)
            }
        };
        [
            percent(component(r) * 100.0),
            percent(component(g) * 100.0),
            percent(component(b) * 100.0),
            percent(k * 100.0),
        ]
    }

    /// CIE L*a*b* under D65.
    pub fn to_lab(self) -> [i64; 3] {
        let linear = |c: f64| {
            if c > 0.04045 {
                ((c + 0.055) / 1.055).powf(2.4)
            } else {
                c / 12.92
            }
        };
        let (r, g, b) = self.unit();
        let (r, g, b) = (linear(r), linear(g), linear(b));
        let x = (r * 0.412_456_4 + g * 0.357_576_1 + b * 0.180_437_5) * 100.0 / 95.047;
        let y = (r * 0.212_672_9 + g * 0.715_152_2 + b * 0.072_175) * 100.0 / 100.0;
        let z = (r * 0.019_333_9 + g * 0.119_192 + b * 0.950_304_1) * 100.0 / 108.883;
        let f = |t: f64| {
            if t > 0.008_856 {
                t.cbrt()
            } else {
                7.787 * t + 16.0 / 116.0
            }
        };
        let (x, y, z) = (f(x), f(y), f(z));
        [
            round(116.0 * y - 16.0),
            round(500.0 * (x - y)),
            round(200.0 * (y - z)),
        ]
    }

    /// Nearest entry of the xterm 256-color palette.
    pub fn to_ansi256(self) -> u8 {
        let (r, g, b) = (self.r, self.g, self.b);
        if r == g && g == b {
            if r < 8 {
                return 16;
            }
            if r > 248 {
                return 231;
            }
            return (round((f64::from(r) - 8.0) / 247.0 * 24.0) + 232) as u8;
        }
        let cube = |c: u8| round(f64::from(c) / 255.0 * 5.0);
        (16 + 36 * cube(r) + 6 * cube(g) + cube(b)) as u8
    }
}

impl Hsl {
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(self) -> Rgb {
        let h = f64::from(self.h) / 360.0;
        let s = f64::from(self.s.min(100)) / 100.0;
        let l = f64::from(self.l.min(100)) / 100.0;

        if s == 0.0 {
            let value = channel(l * 255.0);
            return Rgb::new(value, value, value);
        }

        let t2 = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let t1 = 2.0 * l - t2;
        let mut channels = [0u8; 3];
        for (i, slot) in channels.iter_mut().enumerate() {
            let mut t3 = h + 1.0 / 3.0 * -(i as f64 - 1.0);
            if t3 < 0.0 {
                t3 += 1.0;
            }
            if t3 > 1.0 {
                t3 -= 1.0;
            }
            let value = if 6.0 * t3 < 1.0 {
                t1 + (t2 - t1) * 6.0 * t3
            } else if 2.0 * t3 < 1.0 {
                t2
            } else if 3.0 * t3 < 2.0 {
                t1 + (t2 - t1) * (2.0 / 3.0 - t3) * 6.0
            } else {
                t1
            };
            *slot = channel(value * 255.0);
        }
        Rgb::new(channels[0], channels[1], channels[2])
    }

    fn lighter(self) -> Self {
        Self::new(self.h, self.s, self.l.saturating_add(20).min(100))
    }

    fn darker(self) -> Self {
        Self::new(self.h, self.s, self.l.saturating_sub(20))
    }

    fn saturated(self) -> Self {
        Self::new(self.h, self.s.saturating_add(20).min(100), self.l)
    }

    fn desaturated(self) -> Self {
        Self::new(self.h, self.s.saturating_sub(20), self.l)
    }

    fn complement(self) -> Self {
        Self::new((self.h + 180) % 360, self.s, self.l)
    }
}

fn captured(caps: &regex::Captures<'_>, index: usize) -> Result<u32> {
    caps.get(index)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .ok_or_else(|| ToolError::validation("Invalid color", "component out of range"))
}

/// Parse a HEX, RGB or HSL color. HSL input keeps its own components so
/// variations derive from what the user typed.
pub fn parse(input: &str) -> Result<(Rgb, Option<Hsl>)> {
    let color = require_input(input, "Please enter a color value")?;
    if let Some(digits) = color.strip_prefix('#') {
        let rgb = Rgb::from_hex(digits)
            .ok_or_else(|| ToolError::validation("Invalid HEX format", color))?;
        return Ok((rgb, None));
    }
    if color.starts_with("rgb") {
        let caps = RGB
            .captures(color)
            .ok_or_else(|| ToolError::validation("Invalid RGB format", color))?;
        let rgb = Rgb::new(
            captured(&caps, 1)?.min(255) as u8,
            captured(&caps, 2)?.min(255) as u8,
            captured(&caps, 3)?.min(255) as u8,
        );
        return Ok((rgb, None));
    }
    if color.starts_with("hsl") {
        let caps = HSL
            .captures(color)
            .ok_or_else(|| ToolError::validation("Invalid HSL format", color))?;
        let hsl = Hsl::new(
            (captured(&caps, 1)? % 360) as u16,
            captured(&caps, 2)?.min(100) as u8,
            captured(&caps, 3)?.min(100) as u8,
        );
        return Ok((hsl.to_rgb(), Some(hsl)));
    }
    Err(ToolError::unsupported(
        "Unsupported color format. Use HEX, RGB, or HSL",
    ))
}

/// Formats and variations of a color.
pub fn view(input: &str) -> Result<PanelView> {
    let (rgb, parsed_hsl) = parse(input)?;
    let hsl = parsed_hsl.unwrap_or_else(|| rgb.to_hsl());
    let (hv, sv, vv) = rgb.to_hsv();
    let [c, m, y, k] = rgb.to_cmyk();
    let [lab_l, lab_a, lab_b] = rgb.to_lab();
    let hex = rgb.hex();

    let formats = PanelSection::new("Formats")
        .with_entry("HEX", hex.clone())
        .with_entry("RGB", format!("rgb({}, {}, {})", rgb.r, rgb.g, rgb.b))
        .with_entry("HSL", format!("hsl({}, {}%, {}%)", hsl.h, hsl.s, hsl.l))
        .with_entry("HSV", format!("hsv({hv}, {sv}%, {vv}%)"))
        .with_entry("CMYK", format!("cmyk({c}%, {m}%, {y}%, {k}%)"))
        .with_entry("LAB", format!("lab({lab_l}, {lab_a}, {lab_b})"))
        .with_entry("ANSI256", rgb.to_ansi256().to_string());

    let variations = PanelSection::new("Variations")
        .with_entry("Lighter", hsl.lighter().to_rgb().hex())
        .with_entry("Darker", hsl.darker().to_rgb().hex())
        .with_entry("Saturated", hsl.saturated().to_rgb().hex())
        .with_entry("Desaturated", hsl.desaturated().to_rgb().hex())
        .with_entry("Complement", hsl.complement().to_rgb().hex());

    Ok(PanelView::new()
        .with_section(formats)
        .with_section(variations)
        .with_preview(hex))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn dodger_blue_formats() {
        let view = view(DEFAULT_COLOR).unwrap();
        let formats = view.section("Formats").unwrap();
        assert_eq!(formats.get("HEX"), Some("#1e90ff"));
        assert_eq!(formats.get("RGB"), Some("rgb(30, 144, 255)"));
        assert_eq!(formats.get("HSL"), Some("hsl(210, 100%, 56%)"));
        assert_eq!(formats.get("HSV"), Some("hsv(210, 88%, 100%)"));
        assert_eq!(formats.get("CMYK"), Some("cmyk(88%, 44%, 0%, 0%)"));
        assert_eq!(formats.get("ANSI256"), Some("75"));
        assert_eq!(view.preview.as_deref(), Some("#1e90ff"));
    }

    #[test]
    fn primaries() {
        assert_eq!(Rgb::new(255, 0, 0).to_lab(), [53, 80, 67]);
        assert_eq!(Rgb::new(0, 0, 0).to_cmyk(), [0, 0, 0, 100]);
        assert_eq!(Rgb::new(255, 255, 255).to_ansi256(), 231);
        assert_eq!(Rgb::new(128, 128, 128).to_ansi256(), 244);
        assert_eq!(Rgb::from_hex("f00"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(Hsl::new(0, 100, 50).to_rgb(), Rgb::new(255, 0, 0));
        assert_eq!(Hsl::new(120, 0, 50).to_rgb(), Rgb::new(128, 128, 128));
    }

    #[test]
    fn rgb_and_hsl_inputs() {
        let view = view("rgba(255, 0, 0, 0.5)").unwrap();
        let variations = view.section("Variations").unwrap();
        assert_eq!(variations.get("Complement"), Some("#00ffff"));
        assert_eq!(variations.get("Lighter"), Some("#ff6666"));
        assert_eq!(variations.get("Darker"), Some("#990000"));

        let view = super::view("hsl(210, 100%, 56%)").unwrap();
        let formats = view.section("Formats").unwrap();
        assert_eq!(formats.get("HSL"), Some("hsl(210, 100%, 56%)"));
        assert_eq!(formats.get("RGB"), Some("rgb(31, 143, 255)"));
    }

    #[test]
    fn unsupported_and_empty_input() {
        let error = view("red").unwrap_err();
        assert_eq!(error.kind(), toolbox_model::ErrorKind::UnsupportedFormat);
        assert_eq!(error.to_string(), "Unsupported color format. Use HEX, RGB, or HSL");
        assert_eq!(view("  ").unwrap_err().to_string(), "Please enter a color value");
        assert!(view("#12345").is_err());
        assert!(view("rgb(1 2 3)").is_err());
    }

    proptest! {
        #[test]
        fn hex_round_trips(r: u8, g: u8, b: u8) {
            let rgb = Rgb::new(r, g, b);
            prop_assert_eq!(Rgb::from_hex(&rgb.hex()[1..]), Some(rgb));
        }
    }
}
