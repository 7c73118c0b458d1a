//! Presentation and dispatch vocabulary shared by every tool.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which half of a bidirectional tool runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Encode,
    Decode,
}

impl Mode {
    /// The other mode.
    pub fn flipped(self) -> Self {
        match self {
            Mode::Encode => Mode::Decode,
            Mode::Decode => Mode::Encode,
        }
    }

    pub fn is_encode(self) -> bool {
        matches!(self, Mode::Encode)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Encode => f.write_str("encode"),
            Mode::Decode => f.write_str("decode"),
        }
    }
}

/// Where a tool's result is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    /// Plain text for the structured editor.
    StructuredText,
    /// An HTML fragment for a custom surface.
    CustomHtml,
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKind::StructuredText => f.write_str("text"),
            OutputKind::CustomHtml => f.write_str("html"),
        }
    }
}

/// Sidebar grouping. Presentation only, never affects behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Formatter,
    Converter,
    Generator,
    Inspector,
}

impl Category {
    /// Display order of categories.
    pub const ALL: [Category; 4] = [
        Category::Formatter,
        Category::Converter,
        Category::Generator,
        Category::Inspector,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Formatter => "Formatters",
            Category::Converter => "Converters",
            Category::Generator => "Generators",
            Category::Inspector => "Inspectors",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Button captions for the current mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Labels {
    pub encode_text: &'static str,
    pub decode_text: &'static str,
    pub action_text: &'static str,
}

impl Labels {
    pub const fn new(
        encode_text: &'static str,
        decode_text: &'static str,
        action_text: &'static str,
    ) -> Self {
        Self {
            encode_text,
            decode_text,
            action_text,
        }
    }

    /// Default captions used when a tool only customises the action button.
    pub const fn action(action_text: &'static str) -> Self {
        Self::new("Encode", "Decode", action_text)
    }
}

impl Default for Labels {
    fn default() -> Self {
        Self::action("Format")
    }
}

/// A value that may differ between the two modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerMode<T> {
    pub encode: T,
    pub decode: T,
}

impl<T: Copy> PerMode<T> {
    /// Same value for both modes.
    pub const fn both(value: T) -> Self {
        Self {
            encode: value,
            decode: value,
        }
    }

    pub const fn new(encode: T, decode: T) -> Self {
        Self { encode, decode }
    }

    pub fn get(&self, mode: Mode) -> T {
        match mode {
            Mode::Encode => self.encode,
            Mode::Decode => self.decode,
        }
    }
}
