//! Pure derivations behind the live panels.
//!
//! A panel turns the raw text of its input field into a [`PanelView`]. The
//! functions here never keep state: the same input always gives the same
//! view, and bad input is an ordinary [`ToolError`].

pub mod color;
pub mod image;
pub mod number_base;

use std::fmt;

use serde::Serialize;
use toolbox_model::{Result, ToolError};

/// A titled group of `(label, value)` rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelSection {
    pub title: String,
    pub entries: Vec<(String, String)>,
}

impl PanelSection {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((label.into(), value.into()));
        self
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, value)| value.as_str())
    }
}

/// What a panel displays for one input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PanelView {
    pub sections: Vec<PanelSection>,
    /// Value for the preview surface: a CSS color or an image data URL.
    pub preview: Option<String>,
}

impl PanelView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, section: PanelSection) -> Self {
        self.sections.push(section);
        self
    }

    pub fn with_preview(mut self, preview: impl Into<String>) -> Self {
        self.preview = Some(preview.into());
        self
    }

    pub fn section(&self, title: &str) -> Option<&PanelSection> {
        self.sections.iter().find(|s| s.title == title)
    }
}

/// The panels available in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    Color,
    Base64Image,
    NumberBase,
}

impl PanelKind {
    /// Derive the view for `raw` input.
    pub fn view(self, raw: &str) -> Result<PanelView> {
        match self {
            PanelKind::Color => color::view(raw),
            PanelKind::Base64Image => image::view(raw),
            PanelKind::NumberBase => number_base::view(raw),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PanelKind::Color => "color",
            PanelKind::Base64Image => "base64-image",
            PanelKind::NumberBase => "number-base",
        }
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn require_input<'a>(raw: &'a str, message: &str) -> Result<&'a str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(ToolError::message(message))
    } else {
        Ok(trimmed)
    }
}
