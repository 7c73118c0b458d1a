//! Tool definitions: one typed record per catalog entry.

use std::fmt;
use std::sync::Arc;

use futures_util::future::BoxFuture;
use toolbox_model::{Category, Labels, Mode, OutputKind, PerMode, Result};
use toolbox_tools::PanelKind;

/// A transform that completes in-process.
pub type SyncTransform = fn(&str, Mode) -> Result<String>;

/// A transform that completes later. The future must not borrow the caller.
pub type AsyncTransform =
    Arc<dyn Fn(String, Mode) -> BoxFuture<'static, Result<String>> + Send + Sync>;

/// How a tool produces its output.
#[derive(Clone)]
pub enum Driver {
    Sync(SyncTransform),
    Async(AsyncTransform),
    /// A live panel that bypasses the editor.
    Panel(PanelKind),
}

impl fmt::Debug for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Driver::Sync(_) => f.write_str("Sync"),
            Driver::Async(_) => f.write_str("Async"),
            Driver::Panel(kind) => f.debug_tuple("Panel").field(kind).finish(),
        }
    }
}

/// Everything the engine and the UI need to know about one tool.
///
/// Definitions are immutable once registered and hold no per-invocation
/// state; the only mode state lives in the [`Session`](crate::Session).
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub id: &'static str,
    pub title: &'static str,
    pub category: Category,
    pub driver: Driver,
    pub supports_modes: bool,
    pub output_kind: OutputKind,
    languages: PerMode<&'static str>,
    placeholders: PerMode<&'static str>,
    labels: Labels,
}

impl ToolDefinition {
    pub fn new(id: &'static str, title: &'static str, category: Category, driver: Driver) -> Self {
        let output_kind = match driver {
            Driver::Panel(_) => OutputKind::CustomHtml,
            _ => OutputKind::StructuredText,
        };
        Self {
            id,
            title,
            category,
            driver,
            supports_modes: false,
            output_kind,
            languages: PerMode::both("plaintext"),
            placeholders: PerMode::both(""),
            labels: Labels::default(),
        }
    }

    pub fn sync(
        id: &'static str,
        title: &'static str,
        category: Category,
        transform: SyncTransform,
    ) -> Self {
        Self::new(id, title, category, Driver::Sync(transform))
    }

    pub fn asynchronous(
        id: &'static str,
        title: &'static str,
        category: Category,
        transform: AsyncTransform,
    ) -> Self {
        Self::new(id, title, category, Driver::Async(transform))
    }

    pub fn panel(id: &'static str, title: &'static str, category: Category, kind: PanelKind) -> Self {
        Self::new(id, title, category, Driver::Panel(kind))
    }

    /// Enable Encode/Decode with the given button captions.
    pub fn with_modes(mut self, encode_text: &'static str, decode_text: &'static str) -> Self {
        self.supports_modes = true;
        self.labels.encode_text = encode_text;
        self.labels.decode_text = decode_text;
        self
    }

    pub fn with_action(mut self, action_text: &'static str) -> Self {
        self.labels.action_text = action_text;
        self
    }

    pub fn with_language(self, language: &'static str) -> Self {
        self.with_languages(language, language)
    }

    pub fn with_languages(mut self, encode: &'static str, decode: &'static str) -> Self {
        self.languages = PerMode::new(encode, decode);
        self
    }

    pub fn with_placeholder(self, placeholder: &'static str) -> Self {
        self.with_placeholders(placeholder, placeholder)
    }

    pub fn with_placeholders(mut self, encode: &'static str, decode: &'static str) -> Self {
        self.placeholders = PerMode::new(encode, decode);
        self
    }

    pub fn with_output(mut self, kind: OutputKind) -> Self {
        self.output_kind = kind;
        self
    }

    /// Modes this tool exposes: both when it supports modes, otherwise the
    /// single implicit one.
    pub fn modes(&self) -> &'static [Mode] {
        if self.supports_modes {
            &[Mode::Encode, Mode::Decode]
        } else {
            &[Mode::Encode]
        }
    }

    fn effective(&self, mode: Mode) -> Mode {
        if self.supports_modes { mode } else { Mode::Encode }
    }

    /// Editor language tag.
    pub fn syntax_language(&self, mode: Mode) -> &'static str {
        self.languages.get(self.effective(mode))
    }

    pub fn placeholder(&self, mode: Mode) -> &'static str {
        self.placeholders.get(self.effective(mode))
    }

    /// Button captions. Mode captions are only meaningful when
    /// [`supports_modes`](Self::supports_modes) is set.
    pub fn labels(&self, _mode: Mode) -> Labels {
        self.labels
    }

    pub fn panel_kind(&self) -> Option<PanelKind> {
        match self.driver {
            Driver::Panel(kind) => Some(kind),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn echo(input: &str, _mode: Mode) -> Result<String> {
        Ok(input.to_string())
    }

    #[test]
    fn single_mode_tools_ignore_the_mode() {
        let tool = ToolDefinition::sync("echo", "Echo", Category::Formatter, echo)
            .with_languages("json", "yaml")
            .with_placeholders("encode me", "decode me");
        assert_eq!(tool.syntax_language(Mode::Decode), "json");
        assert_eq!(tool.placeholder(Mode::Decode), "encode me");
        assert_eq!(tool.modes(), &[Mode::Encode]);
    }

    #[test]
    fn mode_tools_switch_metadata() {
        let tool = ToolDefinition::sync("echo", "Echo", Category::Converter, echo)
            .with_modes("A → B", "B → A")
            .with_action("Convert")
            .with_languages("yaml", "json")
            .with_placeholders("a", "b");
        assert_eq!(tool.syntax_language(Mode::Decode), "json");
        assert_eq!(tool.placeholder(Mode::Decode), "b");
        let labels = tool.labels(Mode::Encode);
        assert_eq!(labels.encode_text, "A → B");
        assert_eq!(labels.action_text, "Convert");
    }

    #[test]
    fn panels_render_to_custom_html() {
        let tool = ToolDefinition::panel("color", "Color", Category::Inspector, PanelKind::Color);
        assert_eq!(tool.output_kind, OutputKind::CustomHtml);
        assert_eq!(tool.panel_kind(), Some(PanelKind::Color));
        assert_eq!(format!("{:?}", tool.driver), "Panel(Color)");
    }
}
