//! Command implementations, kept free of argument parsing so they can be
//! tested directly.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table, modifiers::UTF8_ROUND_CORNERS};
use toolbox_core::{OutputRenderer, PanelState, ReactivePanel, ToolRegistry, TransformEngine};
use toolbox_model::{Mode, QrOptions};
use toolbox_qr::Decoded;
use toolbox_tools::PanelView;
use tracing::info;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// The catalog as a table, grouped by category.
pub fn list_table(registry: &ToolRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Category", "Modes", "Output"]);
    apply_table_style(&mut table);
    for tool in registry.all() {
        let modes = if tool.supports_modes {
            let labels = tool.labels(Mode::Encode);
            format!("{} / {}", labels.encode_text, labels.decode_text)
        } else if tool.panel_kind().is_some() {
            "panel".to_string()
        } else {
            "-".to_string()
        };
        table.add_row(vec![
            tool.id.to_string(),
            tool.title.to_string(),
            tool.category.to_string(),
            modes,
            tool.output_kind.to_string(),
        ]);
    }
    table
}

/// Read the whole input from `path`, or from stdin when `None`.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("read input {}", path.display()))
        }
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("read input from stdin")?;
            Ok(input)
        }
    }
}

/// Run one tool through the engine and render the result.
///
/// Tool failures go to the renderer; only host problems (unknown tool, a
/// panel tool) are returned as errors.
pub async fn run_tool(
    registry: Arc<ToolRegistry>,
    tool_id: &str,
    input: String,
    mode: Mode,
    renderer: &mut dyn OutputRenderer,
) -> Result<()> {
    let Some(tool) = registry.lookup(tool_id) else {
        bail!("unknown tool '{tool_id}'; run `toolbox list` to see available tools");
    };
    if tool.panel_kind().is_some() {
        bail!("'{tool_id}' is a live panel; use `toolbox panel {tool_id} <VALUE>`");
    }
    if mode == Mode::Decode && !tool.supports_modes {
        bail!("'{tool_id}' has a single mode; drop --decode");
    }

    let mut engine = TransformEngine::new(registry, tool_id);
    engine.set_mode(mode, &input, renderer);
    info!(tool = tool_id, %mode, bytes = input.len(), "running tool");
    let invocation = engine.invoke_current(input).await;
    engine.render(invocation, renderer);
    Ok(())
}

/// What to feed a panel.
#[derive(Debug, Clone)]
pub enum PanelInput {
    Value(String),
    File(PathBuf),
}

/// Drive the panel of `tool_id` once and return its view.
pub fn panel_view(registry: &ToolRegistry, tool_id: &str, input: &PanelInput) -> Result<PanelView> {
    let Some(tool) = registry.lookup(tool_id) else {
        bail!("unknown tool '{tool_id}'; run `toolbox list` to see available tools");
    };
    let Some(mut panel) = ReactivePanel::for_tool(tool) else {
        bail!("'{tool_id}' is not a panel tool; use `toolbox run {tool_id}`");
    };
    let kind = panel.kind();

    let state = match input {
        PanelInput::Value(value) => panel.on_input_change(value),
        PanelInput::File(path) => {
            let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
            panel.load_file(&bytes, mime_for_path(path))
        }
    };
    match state {
        PanelState::Ready(view) => Ok(view.clone()),
        PanelState::Error(message) => bail!("{message}"),
        PanelState::Idle => bail!("no input for the {kind} panel"),
    }
}

/// Guess an image MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// A panel view as a Section / Field / Value table.
pub fn panel_table(view: &PanelView) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Section", "Field", "Value"]);
    apply_table_style(&mut table);
    for section in &view.sections {
        for (label, value) in &section.entries {
            table.add_row(vec![section.title.as_str(), label.as_str(), value.as_str()]);
        }
    }
    table
}

/// Generate a QR code. With `output`, the PNG is written there and `None`
/// returned; otherwise the PNG data URL is returned.
pub async fn qr_encode(
    text: String,
    options: QrOptions,
    output: Option<&Path>,
) -> Result<Option<String>> {
    let Some(output) = output else {
        let data_url = toolbox_qr::generate(text, options).await?;
        return Ok(Some(data_url));
    };
    let png = tokio::task::spawn_blocking(move || {
        toolbox_qr::encode(&text, &options).and_then(|image| image.to_png_bytes())
    })
    .await
    .map_err(|e| anyhow::anyhow!("Task panicked: {e}"))??;
    fs::write(output, &png).with_context(|| format!("write {}", output.display()))?;
    info!(path = %output.display(), bytes = png.len(), "QR code written");
    Ok(None)
}

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Decode the QR code in `path`.
///
/// The file holds either an image data URL as text or raw PNG bytes, which
/// are wrapped into a data URL first.
pub async fn qr_decode(path: &Path) -> Result<Decoded> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let data_url = if bytes.starts_with(&PNG_SIGNATURE) {
        format!("data:image/png;base64,{}", STANDARD.encode(&bytes))
    } else {
        String::from_utf8(bytes)
            .with_context(|| format!("{} is neither a PNG nor a data URL", path.display()))?
            .trim()
            .to_string()
    };
    let decoded = toolbox_qr::read(data_url).await?;
    info!(strategy = decoded.strategy.strategy_name, "QR code decoded");
    Ok(decoded)
}
