//! Live panels: tools that recompute their view on every input change
//! instead of going through the editor and the engine.

use toolbox_tools::panels::image;
use toolbox_tools::{PanelKind, PanelView};

use crate::definition::ToolDefinition;

/// What a panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PanelState {
    /// Nothing entered yet.
    #[default]
    Idle,
    Ready(PanelView),
    Error(String),
}

/// A panel bound to one derivation.
///
/// Bad input never escapes as an error: it moves the panel to
/// [`PanelState::Error`].
#[derive(Debug, Clone)]
pub struct ReactivePanel {
    kind: PanelKind,
    state: PanelState,
}

impl ReactivePanel {
    pub fn new(kind: PanelKind) -> Self {
        Self {
            kind,
            state: PanelState::Idle,
        }
    }

    /// Panel for a panel-driven tool, `None` for editor tools.
    pub fn for_tool(tool: &ToolDefinition) -> Option<Self> {
        tool.panel_kind().map(Self::new)
    }

    pub fn kind(&self) -> PanelKind {
        self.kind
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    /// Recompute the view for `raw`.
    pub fn on_input_change(&mut self, raw: &str) -> &PanelState {
        self.state = match self.kind.view(raw) {
            Ok(view) => PanelState::Ready(view),
            Err(error) => {
                tracing::debug!(panel = %self.kind, "{error}");
                PanelState::Error(error.to_string())
            }
        };
        &self.state
    }

    /// Feed the bytes of an acquired file. Only the image panel accepts
    /// files.
    pub fn load_file(&mut self, bytes: &[u8], mime: &str) -> &PanelState {
        if self.kind != PanelKind::Base64Image {
            self.state = PanelState::Error(format!("The {} panel does not accept files", self.kind));
            return &self.state;
        }
        match image::load_file(bytes, mime) {
            Ok(data_url) => self.on_input_change(&data_url),
            Err(error) => {
                self.state = PanelState::Error(error.to_string());
                &self.state
            }
        }
    }

    pub fn reset(&mut self) {
        self.state = PanelState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle_and_follows_input() {
        let mut panel = ReactivePanel::new(PanelKind::Color);
        assert_eq!(panel.state(), &PanelState::Idle);

        let PanelState::Ready(view) = panel.on_input_change("#1E90FF") else {
            panic!("expected a view");
        };
        assert_eq!(view.preview.as_deref(), Some("#1e90ff"));

        assert_eq!(
            panel.on_input_change("chartreuse"),
            &PanelState::Error("Unsupported color format. Use HEX, RGB, or HSL".to_string())
        );

        panel.reset();
        assert_eq!(panel.state(), &PanelState::Idle);
    }

    #[test]
    fn same_input_gives_same_view() {
        let mut panel = ReactivePanel::new(PanelKind::NumberBase);
        let first = panel.on_input_change("0x2a").clone();
        let second = panel.on_input_change("0x2a").clone();
        assert_eq!(first, second);
    }

    #[test]
    fn files_only_load_into_the_image_panel() {
        let mut panel = ReactivePanel::new(PanelKind::Base64Image);
        let PanelState::Ready(view) = panel.load_file(b"GIF89a", "image/gif") else {
            panic!("expected a view");
        };
        assert_eq!(view.preview.as_deref(), Some("data:image/gif;base64,R0lGODlh"));

        assert!(matches!(
            panel.load_file(b"hello", "text/plain"),
            PanelState::Error(_)
        ));

        let mut color = ReactivePanel::new(PanelKind::Color);
        assert_eq!(
            color.load_file(b"GIF89a", "image/gif"),
            &PanelState::Error("The color panel does not accept files".to_string())
        );
    }
}
