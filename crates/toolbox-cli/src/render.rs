//! Terminal output for transform results.

use std::io::Write;

use toolbox_core::{OutputRenderer, ToolMetadata};
use toolbox_model::{TransformError, TransformOutput};

/// Writes output content to `out` and `error: <message>` lines to `err`.
///
/// Write failures are logged, not propagated: the engine's renderer
/// callbacks are infallible.
pub struct TerminalRenderer<W: Write, E: Write> {
    out: W,
    err: E,
    failed: bool,
}

impl<W: Write, E: Write> TerminalRenderer<W, E> {
    pub fn new(out: W, err: E) -> Self {
        Self {
            out,
            err,
            failed: false,
        }
    }

    /// Whether an error was rendered.
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_inner(self) -> (W, E) {
        (self.out, self.err)
    }
}

impl<W: Write, E: Write> OutputRenderer for TerminalRenderer<W, E> {
    fn render_output(&mut self, output: &TransformOutput) {
        if let Err(error) = writeln!(self.out, "{}", output.content) {
            tracing::error!(%error, "failed to write output");
        }
    }

    fn render_error(&mut self, error: &TransformError) {
        self.failed = true;
        if let Err(io_error) = writeln!(self.err, "error: {}", error.message) {
            tracing::error!(error = %io_error, "failed to write error");
        }
    }

    fn refresh_metadata(&mut self, metadata: &ToolMetadata) {
        tracing::info!(
            tool = metadata.tool_id,
            mode = %metadata.mode,
            language = metadata.language,
            output = %metadata.output_kind,
            "tool ready"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolbox_model::ErrorKind;

    #[test]
    fn splits_output_and_errors() {
        let mut renderer = TerminalRenderer::new(Vec::new(), Vec::new());
        renderer.render_output(&TransformOutput::text("{}"));
        assert!(!renderer.failed());
        renderer.render_error(&TransformError::new("Invalid JSON: eof", ErrorKind::Validation));
        assert!(renderer.failed());

        let (out, err) = renderer.into_inner();
        assert_eq!(String::from_utf8(out).unwrap(), "{}\n");
        assert_eq!(String::from_utf8(err).unwrap(), "error: Invalid JSON: eof\n");
    }
}
