//! The output side of the engine.

use toolbox_model::{Labels, Mode, OutputKind, TransformError, TransformOutput};

use crate::definition::ToolDefinition;

/// Presentation metadata for the current tool and mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMetadata {
    pub tool_id: &'static str,
    pub title: &'static str,
    pub mode: Mode,
    pub supports_modes: bool,
    pub language: &'static str,
    pub placeholder: &'static str,
    pub labels: Labels,
    pub output_kind: OutputKind,
}

impl ToolMetadata {
    pub fn of(tool: &ToolDefinition, mode: Mode) -> Self {
        Self {
            tool_id: tool.id,
            title: tool.title,
            mode,
            supports_modes: tool.supports_modes,
            language: tool.syntax_language(mode),
            placeholder: tool.placeholder(mode),
            labels: tool.labels(mode),
            output_kind: tool.output_kind,
        }
    }
}

/// Where results go: the output editor, a custom HTML surface, or anything
/// else the host provides.
pub trait OutputRenderer {
    fn render_output(&mut self, output: &TransformOutput);

    fn render_error(&mut self, error: &TransformError);

    /// The tool or mode changed; update language, placeholder and labels.
    fn refresh_metadata(&mut self, metadata: &ToolMetadata);
}

/// Renderer that records everything it is given.
#[derive(Debug, Default)]
pub struct BufferRenderer {
    pub outputs: Vec<TransformOutput>,
    pub errors: Vec<TransformError>,
    pub metadata: Vec<ToolMetadata>,
}

impl BufferRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of the last rendered output.
    pub fn last_content(&self) -> Option<&str> {
        self.outputs.last().map(|output| output.content.as_str())
    }
}

impl OutputRenderer for BufferRenderer {
    fn render_output(&mut self, output: &TransformOutput) {
        self.outputs.push(output.clone());
    }

    fn render_error(&mut self, error: &TransformError) {
        self.errors.push(error.clone());
    }

    fn refresh_metadata(&mut self, metadata: &ToolMetadata) {
        self.metadata.push(metadata.clone());
    }
}
